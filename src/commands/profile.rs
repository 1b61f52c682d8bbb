//! Profile command handler
//!
//! Direct access to the signature registry. Passwords are never printed.

use anyhow::{Context, Result};

use apksign::domain::entities::RegistryEntry;
use apksign::presentation::factory;

use super::{profile_from_flags, CommandContext};
use crate::cli::ProfileAction;

/// Execute a profile subcommand
pub fn cmd_profile(action: ProfileAction, ctx: &CommandContext) -> Result<()> {
    let registry = factory::open_registry(&ctx.config)?;

    match action {
        ProfileAction::Get { package } => match registry.get(&package) {
            Some(profile) => {
                if ctx.json() {
                    println!(
                        "{}",
                        serde_json::json!({
                            "package": package.as_str(),
                            "keystore": profile.keystore().display().to_string(),
                            "alias": profile.alias(),
                        })
                    );
                } else {
                    println!("{}", package);
                    println!("  keystore: {}", profile.keystore().display());
                    println!("  alias:    {}", profile.alias());
                }
            }
            None => anyhow::bail!("no profile recorded for {}", package),
        },

        ProfileAction::Put { package, key } => {
            let profile = profile_from_flags(&key)?.context("--keystore is required")?;
            profile.validate()?;
            registry.put(package.clone(), profile)?;
            if !ctx.json() {
                println!("Recorded profile for {}", package);
            }
        }

        ProfileAction::Remove { package } => {
            let removed = registry.remove(&package)?;
            if ctx.json() {
                println!(
                    "{}",
                    serde_json::json!({ "package": package.as_str(), "removed": removed })
                );
            } else if removed {
                println!("Removed profile for {}", package);
            } else {
                println!("No profile recorded for {}", package);
            }
        }

        ProfileAction::List => {
            let entries = registry.entries();
            if ctx.json() {
                for entry in &entries {
                    println!("{}", entry_json(entry));
                }
            } else if entries.is_empty() {
                println!("No profiles recorded.");
            } else {
                for entry in &entries {
                    println!(
                        "{}  {}  alias={}  updated={}",
                        entry.package,
                        entry.profile.keystore().display(),
                        entry.profile.alias(),
                        entry.updated_at.format("%Y-%m-%d %H:%M:%S")
                    );
                }
            }
        }
    }

    Ok(())
}

fn entry_json(entry: &RegistryEntry) -> serde_json::Value {
    serde_json::json!({
        "package": entry.package.as_str(),
        "keystore": entry.profile.keystore().display().to_string(),
        "alias": entry.profile.alias(),
        "updated_at": entry.updated_at.to_rfc3339(),
    })
}
