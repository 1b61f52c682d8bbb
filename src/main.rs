//! apksign CLI - batch APK signing with zipalign and apksigner
//!
//! Usage: apksign <COMMAND>
//!
//! Commands:
//!   sign     Align and sign APKs
//!   inspect  Print the signing certificates of APKs
//!   profile  Manage recorded signing profiles
//!   suggest  Show the recorded profile for a file

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use apksign::config::Config;
use apksign::presentation::OutputFormat;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let (config, warnings) = Config::load_or_default(cli.config.as_deref())?;
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    let ctx = CommandContext {
        config,
        format: OutputFormat::from_json_flag(cli.json),
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Sign(args) => commands::cmd_sign(args, &ctx),
        Commands::Inspect { files, jobs } => commands::cmd_inspect(files, jobs, &ctx),
        Commands::Profile { action } => commands::cmd_profile(action, &ctx),
        Commands::Suggest { files } => commands::cmd_suggest(files, &ctx),
    }
}

/// `RUST_LOG` when set, otherwise warn / info / debug / trace by `-v` count
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
