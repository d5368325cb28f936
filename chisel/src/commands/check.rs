use std::path::PathBuf;

use chisel_codegen::read_source_files;
use clap::Args;
use eyre::Result;

use crate::config::Config;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to chisel.toml
    #[arg(short, long, default_value = "chisel.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Parse the whole source tree and print diagnostics; exits non-zero
    /// when any file fails to parse.
    pub fn run(&self) -> Result<()> {
        let config = Config::load(&self.config)?;
        let (files, diagnostics) = read_source_files(&config.project.source_dir);

        for diagnostic in &diagnostics {
            eprintln!("{diagnostic}");
        }

        let mut entities = 0usize;
        let mut enums = 0usize;
        let mut failures = 0usize;

        for (path, text) in &files {
            match chisel_parser::parse_str_with_filename(text, &path.display().to_string()) {
                Ok(models) => {
                    for model in &models {
                        if model.is_enum {
                            enums += 1;
                        } else {
                            entities += 1;
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    eprintln!("{:?}", miette::Report::new(*e));
                }
            }
        }

        if failures > 0 {
            eprintln!(
                "{} of {} source files failed to parse",
                failures,
                files.len()
            );
            std::process::exit(1);
        }

        println!(
            "✓ {} files parsed: {} entities, {} enums",
            files.len(),
            entities,
            enums
        );
        Ok(())
    }
}
