//! Signature Registry
//!
//! Package name → last-used signing profile. The table is loaded once;
//! every mutation goes through the repository's locked read-modify-write and
//! then replaces the in-memory copy.

use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use crate::domain::entities::{RegistryEntry, SignProfile, SignatureTable};
use crate::domain::policies::{AutoMatch, AutoMatchPolicy, NoMatchReason};
use crate::domain::ports::{PackageIdentityResolver, RegistryError, RegistryRepository};
use crate::domain::value_objects::PackageId;
use crate::error::ApkSignResult;

pub struct SignatureRegistry {
    repository: Arc<dyn RegistryRepository>,
    table: RwLock<SignatureTable>,
}

impl SignatureRegistry {
    /// Load the persisted table
    pub fn open(repository: Arc<dyn RegistryRepository>) -> Result<Self, RegistryError> {
        let table = repository.load()?;
        Ok(Self {
            repository,
            table: RwLock::new(table),
        })
    }

    pub fn get(&self, package: &PackageId) -> Option<SignProfile> {
        self.read().get(package).map(|entry| entry.profile.clone())
    }

    /// Insert or overwrite, flushed before returning
    pub fn put(&self, package: PackageId, profile: SignProfile) -> Result<(), RegistryError> {
        let entry = RegistryEntry {
            package,
            profile,
            updated_at: Utc::now(),
        };
        debug!(package = %entry.package, "recording profile");
        self.mutate(&mut |table| table.upsert(entry.clone()))
    }

    /// Remove the entry; `false` when there was none
    pub fn remove(&self, package: &PackageId) -> Result<bool, RegistryError> {
        let existed = self.read().get(package).is_some();
        self.mutate(&mut |table| {
            table.remove(package);
        })?;
        Ok(existed)
    }

    pub fn entries(&self) -> Vec<RegistryEntry> {
        self.read().all().cloned().collect()
    }

    /// Profile to offer for `selection`, if the policy allows one
    pub fn suggest(
        &self,
        policy: &AutoMatchPolicy,
        selection: &[PathBuf],
        resolver: &dyn PackageIdentityResolver,
    ) -> AutoMatch {
        if let Err(reason) = policy.precheck(selection.len()) {
            return AutoMatch::NoMatch(reason);
        }
        let package = match resolver.resolve(&selection[0]) {
            Ok(package) => package,
            Err(e) => {
                return AutoMatch::NoMatch(NoMatchReason::IdentityUnavailable(e.to_string()))
            }
        };
        let stored = self.get(&package);
        policy.judge(package, stored)
    }

    /// Drop the association for `package` unless exactly one file is selected
    pub fn forget_when_ambiguous(
        &self,
        selection_len: usize,
        package: &PackageId,
    ) -> Result<bool, RegistryError> {
        if selection_len == 1 {
            return Ok(false);
        }
        self.remove(package)
    }

    /// Record `profile` for the single selected file after a successful batch
    ///
    /// Returns the package it was recorded under, or `None` when the policy
    /// does not allow recording for this selection.
    pub fn remember(
        &self,
        policy: &AutoMatchPolicy,
        selection: &[PathBuf],
        resolver: &dyn PackageIdentityResolver,
        profile: &SignProfile,
    ) -> ApkSignResult<Option<PackageId>> {
        if !policy.should_record(selection.len()) {
            return Ok(None);
        }
        let package = resolver.resolve(&selection[0])?;
        self.put(package.clone(), profile.clone())?;
        Ok(Some(package))
    }

    fn mutate(&self, change: &mut dyn FnMut(&mut SignatureTable)) -> Result<(), RegistryError> {
        let mut table = self.write();
        let written = self.repository.update(change)?;
        *table = written;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, SignatureTable> {
        self.table.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SignatureTable> {
        self.table
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
