//! RegistryRepository port
//!
//! Persists the signature registry (package name → last-used profile).

use crate::domain::entities::SignatureTable;
use std::path::PathBuf;

pub trait RegistryRepository: Send + Sync {
    fn load(&self) -> Result<SignatureTable, RegistryError>;
    fn save(&self, table: &SignatureTable) -> Result<(), RegistryError>;

    /// Read-modify-write of the stored table, returning what was written.
    ///
    /// File-backed repositories hold their cross-process lock for the whole
    /// cycle so concurrent writers never drop each other's entries.
    fn update(
        &self,
        mutate: &mut dyn FnMut(&mut SignatureTable),
    ) -> Result<SignatureTable, RegistryError> {
        let mut table = self.load()?;
        mutate(&mut table);
        self.save(&table)?;
        Ok(table)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Failed to access registry: {message}")]
    AccessError { message: String },

    #[error("Failed to serialize registry: {message}")]
    SerializationError { message: String },

    #[error(
        "registry file corrupted: {path}\n  → Fix: Delete it and sign once to rebuild the suggestions\n  → Run: rm {path}\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },

    #[error("registry version {found} is newer than supported version {supported}: {path}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
}
