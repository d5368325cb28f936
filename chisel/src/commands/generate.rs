use std::path::PathBuf;

use chisel_codegen::{ScaffoldContext, ScaffoldPlan, Scaffolder, TemplateStore};
use chisel_ir::ClassModel;
use clap::Args;
use eyre::{Result, bail};
use tracing::debug;

use crate::config::Config;

#[derive(Args)]
pub struct GenerateCommand {
    /// Entity to scaffold (omit with --all)
    pub entity: Option<String>,

    /// Scaffold every parsed entity
    #[arg(long, conflicts_with = "entity")]
    pub all: bool,

    /// Path to chisel.toml
    #[arg(short, long, default_value = "chisel.toml")]
    pub config: PathBuf,

    /// Overwrite existing target files
    #[arg(long)]
    pub force: bool,

    /// Preview target paths without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(&self.config)?;
        debug!(source = %config.project.source_dir.display(), "loading entities");
        let ctx = ScaffoldContext::load(&config.project.source_dir);

        for diagnostic in ctx.diagnostics() {
            eprintln!("{diagnostic}");
        }

        let targets: Vec<&ClassModel> = if self.all {
            ctx.entities().collect()
        } else {
            let Some(name) = self.entity.as_deref() else {
                bail!("name an entity to scaffold, or pass --all");
            };
            match ctx.find(name) {
                Some(model) => vec![model],
                None => bail!("entity '{name}' not found; run 'chisel list' to see what parsed"),
            }
        };
        if targets.is_empty() {
            bail!(
                "no entities found under '{}'",
                config.project.source_dir.display()
            );
        }

        let store = TemplateStore::new(&config.project.template_dir);
        let plan = ScaffoldPlan::full(config.layout());
        let scaffolder = Scaffolder::new(&store, &plan).with_force(self.force);

        for model in targets {
            println!("{} ({})", model.name, model.namespace);
            if self.dry_run {
                let (files, diagnostics) = scaffolder.preview(model);
                for file in &files {
                    println!("  ~ {}", file.path.display());
                }
                for diagnostic in &diagnostics {
                    println!("  {diagnostic}");
                }
            } else {
                let result = scaffolder.scaffold(model);
                for path in &result.written {
                    println!("  + {}", path.display());
                }
                for path in &result.skipped {
                    println!("  = {} (exists, use --force)", path.display());
                }
                for diagnostic in &result.diagnostics {
                    println!("  {diagnostic}");
                }
            }
            println!();
        }

        Ok(())
    }
}
