//! Sign command handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use apksign::domain::policies::AutoMatch;
use apksign::presentation::{factory, output};
use apksign::{Outcome, SchemeSet, SignOptions, SignProfile, SignRequest};

use super::{cancel_on_ctrlc, profile_from_flags, CommandContext};
use crate::cli::SignArgs;

/// Execute the sign command
pub fn cmd_sign(args: SignArgs, ctx: &CommandContext) -> Result<()> {
    let sign = &ctx.config.sign;
    let options = SignOptions::new()
        .with_zip_align(args.zip_align().unwrap_or(sign.zip_align))
        .with_schemes(if args.schemes.is_empty() {
            sign.scheme_set()
        } else {
            args.schemes.iter().copied().collect::<SchemeSet>()
        })
        .with_parallelism(args.jobs.unwrap_or(sign.parallelism));
    let options = match args.out.clone().or_else(|| sign.output_dir.clone()) {
        Some(dir) => options.with_output_dir(dir),
        None => options,
    };

    let policy = sign.auto_match_policy();
    let profile = match profile_from_flags(&args.key)? {
        Some(profile) => profile,
        None => auto_matched_profile(&args.files, ctx)?,
    };

    factory::preflight_tools(&ctx.config.tools, options.zip_align)?;

    let cancel = cancel_on_ctrlc()?;
    let events = output::create_event_sink(ctx.format, "sign", ctx.verbose);
    let use_case = factory::create_sign_use_case(&ctx.config.tools);
    let request = SignRequest::new(args.files.clone(), profile.clone()).with_options(options);

    let report = use_case.execute(&request, events.as_ref(), &cancel);

    match report.merged()? {
        Outcome::Succeeded(_) => {}
        Outcome::Failed(failure) => bail!("{}", failure.message()),
        Outcome::NotStarted | Outcome::InProgress => bail!("signing did not complete"),
    }

    if policy.is_enabled() && !args.no_remember {
        remember_profile(&args.files, &profile, ctx);
    }

    if !ctx.json() {
        for outcome in &report.outcomes {
            if let Some(output) = outcome.value() {
                println!("{}", output.display());
            }
        }
    }

    Ok(())
}

fn auto_matched_profile(files: &[PathBuf], ctx: &CommandContext) -> Result<SignProfile> {
    let registry = factory::open_registry(&ctx.config)?;
    let resolver = factory::create_identity_resolver(&ctx.config.tools);
    let policy = ctx.config.sign.auto_match_policy();

    match registry.suggest(&policy, files, &resolver) {
        AutoMatch::Suggested { package, profile } => {
            info!(package = %package, "using recorded profile");
            if !ctx.json() {
                eprintln!(
                    "Using recorded profile for {} ({}, alias {})",
                    package,
                    profile.keystore().display(),
                    profile.alias()
                );
            }
            Ok(profile)
        }
        AutoMatch::NoMatch(reason) => {
            bail!("no --keystore given and no recorded profile applies: {}", reason)
        }
    }
}

/// Record the profile after a successful single-file batch; failures only warn
fn remember_profile(files: &[PathBuf], profile: &SignProfile, ctx: &CommandContext) {
    let policy = ctx.config.sign.auto_match_policy();
    let result = factory::open_registry(&ctx.config)
        .context("cannot open signature registry")
        .and_then(|registry| {
            let resolver = factory::create_identity_resolver(&ctx.config.tools);
            Ok(registry.remember(&policy, files, &resolver, profile)?)
        });

    match result {
        Ok(Some(package)) => info!(package = %package, "profile recorded"),
        Ok(None) => {}
        Err(e) => warn!(error = %format!("{:#}", e), "profile not recorded"),
    }
}
