//! Suggest command handler

use std::path::PathBuf;

use anyhow::Result;

use apksign::domain::policies::AutoMatch;
use apksign::presentation::factory;

use super::CommandContext;

/// Execute the suggest command
pub fn cmd_suggest(files: Vec<PathBuf>, ctx: &CommandContext) -> Result<()> {
    let registry = factory::open_registry(&ctx.config)?;
    let resolver = factory::create_identity_resolver(&ctx.config.tools);
    let policy = ctx.config.sign.auto_match_policy();

    let suggestion = registry.suggest(&policy, &files, &resolver);

    if ctx.json() {
        let json = match &suggestion {
            AutoMatch::Suggested { package, profile } => serde_json::json!({
                "event": "suggestion",
                "package": package.as_str(),
                "keystore": profile.keystore().display().to_string(),
                "alias": profile.alias(),
            }),
            AutoMatch::NoMatch(reason) => serde_json::json!({
                "event": "no_suggestion",
                "reason": reason.to_string(),
            }),
        };
        println!("{}", json);
        return Ok(());
    }

    match suggestion {
        AutoMatch::Suggested { package, profile } => {
            println!("{}", package);
            println!("  keystore: {}", profile.keystore().display());
            println!("  alias:    {}", profile.alias());
        }
        AutoMatch::NoMatch(reason) => println!("No suggestion: {}", reason),
    }
    Ok(())
}
