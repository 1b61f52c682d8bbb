//! Signature registry entity
//!
//! Maps an application's package name to the signing profile last used for
//! it, so `apksign suggest` and `apksign sign` can offer it again.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::SignProfile;
use crate::domain::value_objects::PackageId;

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub package: PackageId,
    pub profile: SignProfile,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureTable {
    pub version: u32,
    entries: BTreeMap<PackageId, RegistryEntry>,
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureTable {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite the entry for `entry.package`.
    pub fn upsert(&mut self, entry: RegistryEntry) {
        self.entries.insert(entry.package.clone(), entry);
    }

    pub fn remove(&mut self, package: &PackageId) -> bool {
        self.entries.remove(package).is_some()
    }

    pub fn get(&self, package: &PackageId) -> Option<&RegistryEntry> {
        self.entries.get(package)
    }

    pub fn all(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
