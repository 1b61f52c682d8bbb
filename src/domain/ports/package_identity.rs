//! Package Identity Port
//!
//! Reads an APK's declared package name. Registry lookups key on this name
//! rather than on the file path, so a rebuilt APK at a new path still
//! matches its previous profile.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{PackageId, PackageIdError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("no package inspection tool configured (set [tools].aapt or APKSIGN_AAPT)")]
    NotConfigured,

    #[error("failed to read package identity of {path}: {message}")]
    ToolFailed { path: PathBuf, message: String },

    #[error("no package name found in {path}")]
    NotFound { path: PathBuf },

    #[error("invalid package name in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: PackageIdError,
    },
}

pub trait PackageIdentityResolver: Send + Sync {
    fn resolve(&self, apk: &Path) -> Result<PackageId, IdentityError>;
}
