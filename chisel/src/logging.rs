//! Tracing subscriber initialisation.
//!
//! Only the CLI crate installs a subscriber; the library crates only emit
//! events.
//!
//! | Flag(s) | Filter level |
//! |---------|--------------|
//! | (none)  | WARN         |
//! | `-v`    | INFO         |
//! | `-vv`   | DEBUG        |
//! | `-vvv`  | TRACE        |
//!
//! `RUST_LOG` overrides all of the above when set.

use eyre::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber. Call once, before any tracing
/// macros fire.
pub fn init(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "chisel={level},chisel_parser={level},chisel_codegen={level},chisel_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre::eyre!("failed to initialise tracing: {e}"))
}
