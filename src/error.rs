//! Error types for apksign
//!
//! Uses `thiserror` for library errors. Per-file tool failures are not
//! errors: they become `Outcome::Failed` values. This type covers what stops
//! a command before or around a batch.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ProfileProblem;
use crate::domain::ports::{IdentityError, ProcessError, RegistryError};
use crate::domain::services::AggregateError;
use crate::domain::value_objects::{PackageIdError, UnknownScheme};

/// Result type alias for apksign operations
pub type ApkSignResult<T> = Result<T, ApkSignError>;

/// Main error type for apksign operations
#[derive(Error, Debug)]
pub enum ApkSignError {
    /// Tool could not be launched or was interrupted
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Missing/unreadable keystore or empty alias/password
    #[error("invalid signing profile: {0}")]
    InvalidProfile(#[from] ProfileProblem),

    /// Batch requested with an empty scheme set
    #[error("no signature scheme selected")]
    NoSchemeSelected,

    #[error(transparent)]
    UnknownScheme(#[from] UnknownScheme),

    #[error(transparent)]
    InvalidPackage(#[from] PackageIdError),

    /// Length mismatch or empty selection
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Required tool path unset or not runnable
    #[error("{tool} is not configured: {reason}\n  → Fix: set [tools].{tool} in config.toml or {env}")]
    ToolsNotConfigured {
        tool: &'static str,
        env: &'static str,
        reason: String,
    },

    /// Batch terminated by the caller
    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
