mod check;
mod completions;
mod generate;
mod init;
mod list;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use list::ListCommand;

#[derive(Parser)]
#[command(name = "chisel")]
#[command(version)]
#[command(about = "Scaffold boilerplate source files from annotated entity classes")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter chisel.toml and template tree
    Init(InitCommand),

    /// Scaffold the artifact set for one entity (or all of them)
    Generate(GenerateCommand),

    /// List the parsed entities
    List(ListCommand),

    /// Parse the source tree and report diagnostics without generating
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
