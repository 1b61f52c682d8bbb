//! SignProfile entity - the credential set handed to `apksigner`
//!
//! A profile never caches its validity: the keystore may be deleted or
//! become unreadable at any time, so [`SignProfile::is_valid`] re-checks the
//! file system on every call.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// First violated rule of a profile
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileProblem {
    #[error("keystore path is empty")]
    EmptyKeystorePath,
    #[error("key alias is empty")]
    EmptyAlias,
    #[error("keystore password is empty")]
    EmptyStorePassword,
    #[error("key password is empty")]
    EmptyKeyPassword,
    #[error("keystore not found: {0}")]
    KeystoreMissing(PathBuf),
    #[error("keystore is not a readable file: {path} ({reason})")]
    KeystoreUnreadable { path: PathBuf, reason: String },
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignProfile {
    keystore: PathBuf,
    alias: String,
    store_password: String,
    key_password: String,
}

impl SignProfile {
    pub fn new(
        keystore: impl Into<PathBuf>,
        alias: impl Into<String>,
        store_password: impl Into<String>,
        key_password: impl Into<String>,
    ) -> Self {
        Self {
            keystore: keystore.into(),
            alias: alias.into(),
            store_password: store_password.into(),
            key_password: key_password.into(),
        }
    }

    pub fn keystore(&self) -> &Path {
        &self.keystore
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn store_password(&self) -> &str {
        &self.store_password
    }

    pub fn key_password(&self) -> &str {
        &self.key_password
    }

    /// All fields non-empty and the keystore readable right now.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ProfileProblem> {
        if self.keystore.as_os_str().is_empty() {
            return Err(ProfileProblem::EmptyKeystorePath);
        }
        if self.alias.is_empty() {
            return Err(ProfileProblem::EmptyAlias);
        }
        if self.store_password.is_empty() {
            return Err(ProfileProblem::EmptyStorePassword);
        }
        if self.key_password.is_empty() {
            return Err(ProfileProblem::EmptyKeyPassword);
        }
        if !self.keystore.exists() {
            return Err(ProfileProblem::KeystoreMissing(self.keystore.clone()));
        }
        if !self.keystore.is_file() {
            return Err(ProfileProblem::KeystoreUnreadable {
                path: self.keystore.clone(),
                reason: "not a regular file".to_string(),
            });
        }
        File::open(&self.keystore).map_err(|e| ProfileProblem::KeystoreUnreadable {
            path: self.keystore.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

// Passwords stay out of logs and panic messages.
impl fmt::Debug for SignProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignProfile")
            .field("keystore", &self.keystore)
            .field("alias", &self.alias)
            .field("store_password", &"<redacted>")
            .field("key_password", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SignProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.alias, self.keystore.display())
    }
}
