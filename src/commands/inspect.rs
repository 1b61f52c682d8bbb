//! Inspect command handler
//!
//! Prints `apksigner verify --print-certs` output for each file.

use std::path::PathBuf;

use anyhow::{bail, Result};

use apksign::presentation::{factory, output};
use apksign::Outcome;

use super::{cancel_on_ctrlc, CommandContext};

/// Execute the inspect command
pub fn cmd_inspect(files: Vec<PathBuf>, jobs: Option<usize>, ctx: &CommandContext) -> Result<()> {
    factory::preflight_tools(&ctx.config.tools, false)?;

    let cancel = cancel_on_ctrlc()?;
    let events = output::create_event_sink(ctx.format, "inspect", ctx.verbose);
    let use_case = factory::create_inspect_use_case(&ctx.config.tools);
    let parallelism = jobs.unwrap_or(ctx.config.sign.parallelism);

    let report = use_case.execute(&files, parallelism, events.as_ref(), &cancel);

    if !ctx.json() {
        for (file, outcome) in report.files.iter().zip(&report.outcomes) {
            if let Some(text) = outcome.value() {
                println!("== {} ==", file.display());
                println!("{}", text);
            }
        }
    }

    match report.merged()? {
        Outcome::Succeeded(_) => Ok(()),
        Outcome::Failed(failure) => bail!("{}", failure.message()),
        Outcome::NotStarted | Outcome::InProgress => bail!("inspection did not complete"),
    }
}
