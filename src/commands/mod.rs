//! Command handlers
//!
//! Each handler loads what it needs from the shared context, runs one use
//! case and renders the result.

use anyhow::{Context, Result};

use apksign::config::Config;
use apksign::presentation::OutputFormat;
use apksign::{CancellationToken, SignProfile};

use crate::cli::KeyArgs;

mod inspect;
mod profile;
mod sign;
mod suggest;

pub use inspect::cmd_inspect;
pub use profile::cmd_profile;
pub use sign::cmd_sign;
pub use suggest::cmd_suggest;

/// Settings shared by every command
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub verbose: u8,
}

impl CommandContext {
    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Token cancelled by Ctrl-C
fn cancel_on_ctrlc() -> Result<CancellationToken> {
    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("failed to install Ctrl-C handler")?;
    Ok(cancel)
}

/// Profile from explicit key flags; `None` when no keystore was given
fn profile_from_flags(key: &KeyArgs) -> Result<Option<SignProfile>> {
    let Some(keystore) = &key.keystore else {
        return Ok(None);
    };
    let alias = key
        .alias
        .as_deref()
        .context("--alias is required with --keystore")?;
    let store_password = key
        .store_password
        .as_deref()
        .context("--store-password (or APKSIGN_STORE_PASSWORD) is required with --keystore")?;
    let key_password = key.key_password.as_deref().unwrap_or(store_password);

    Ok(Some(SignProfile::new(
        keystore.clone(),
        alias,
        store_password,
        key_password,
    )))
}
