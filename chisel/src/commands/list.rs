use std::path::PathBuf;

use chisel_codegen::ScaffoldContext;
use chisel_ir::Role;
use clap::Args;
use eyre::Result;

use crate::config::Config;

#[derive(Args)]
pub struct ListCommand {
    /// Path to chisel.toml
    #[arg(short, long, default_value = "chisel.toml")]
    pub config: PathBuf,

    /// Dump the parsed models as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(&self.config)?;
        let ctx = ScaffoldContext::load(&config.project.source_dir);

        if self.json {
            println!("{}", serde_json::to_string_pretty(ctx.models())?);
            return Ok(());
        }

        if ctx.models().is_empty() {
            println!(
                "No entities found under '{}'",
                config.project.source_dir.display()
            );
            return Ok(());
        }

        for model in ctx.models() {
            let kind = if model.is_enum { "enum" } else { "entity" };
            println!("{} ({}, {})", model.name, model.namespace, kind);
            for property in &model.properties {
                let mut notes: Vec<String> = Vec::new();
                if property.role != Role::None {
                    notes.push(property.role.as_str().to_string());
                }
                if let Some(rel) = &property.relationship {
                    if let Some(kind) = rel.kind {
                        notes.push(kind.as_str().to_string());
                    }
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", notes.join(", "))
                };
                println!("  {} {}{suffix}", property.type_name, property.name);
            }
            println!();
        }

        for diagnostic in ctx.diagnostics() {
            eprintln!("{diagnostic}");
        }

        Ok(())
    }
}
