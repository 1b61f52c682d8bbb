//! TOML Registry Repository
//!
//! Persists the signature registry at `~/.config/apksign/registry.toml`.
//! Writes go through a sibling `.lock` file and an atomic rename, so readers
//! never observe a half-written table.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{RegistryEntry, SignProfile, SignatureTable};
use crate::domain::ports::{RegistryError, RegistryRepository};
use crate::domain::value_objects::PackageId;

/// Environment variable overriding the registry location
pub const REGISTRY_PATH_ENV: &str = "APKSIGN_REGISTRY_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlEntry {
    keystore: PathBuf,
    alias: String,
    store_password: String,
    key_password: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlRegistry {
    version: u32,
    #[serde(default)]
    packages: BTreeMap<String, TomlEntry>,
}

pub struct TomlRegistryRepository {
    path: PathBuf,
}

impl TomlRegistryRepository {
    pub fn new() -> Self {
        Self {
            path: default_registry_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn lock(&self) -> Result<fs::File, RegistryError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(access)?;
        }

        let lock_file = fs::File::create(&lock_path).map_err(access)?;
        lock_file.lock_exclusive().map_err(access)?;
        Ok(lock_file)
    }

    fn load_from_disk(&self) -> Result<SignatureTable, RegistryError> {
        if !self.path.exists() {
            return Ok(SignatureTable::new());
        }

        let content = fs::read_to_string(&self.path).map_err(access)?;

        let toml_reg: TomlRegistry =
            toml::from_str(&content).map_err(|e| RegistryError::Corrupted {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        if toml_reg.version > SignatureTable::CURRENT_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                path: self.path.clone(),
                found: toml_reg.version,
                supported: SignatureTable::CURRENT_VERSION,
            });
        }

        from_toml(toml_reg).map_err(|message| RegistryError::Corrupted {
            path: self.path.clone(),
            message,
        })
    }

    fn save_to_disk(&self, table: &SignatureTable) -> Result<(), RegistryError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(access)?;

        let content = toml::to_string_pretty(&to_toml(table)).map_err(|e| {
            RegistryError::SerializationError {
                message: e.to_string(),
            }
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(access)?;
        restrict_permissions(tmp.as_file())?;
        tmp.write_all(content.as_bytes()).map_err(access)?;
        tmp.as_file().sync_all().map_err(access)?;
        tmp.persist(&self.path).map_err(|e| access(e.error))?;

        Ok(())
    }
}

impl Default for TomlRegistryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryRepository for TomlRegistryRepository {
    fn load(&self) -> Result<SignatureTable, RegistryError> {
        self.load_from_disk()
    }

    fn save(&self, table: &SignatureTable) -> Result<(), RegistryError> {
        let lock_file = self.lock()?;
        let result = self.save_to_disk(table);
        let _ = FileExt::unlock(&lock_file);
        result
    }

    fn update(
        &self,
        mutate: &mut dyn FnMut(&mut SignatureTable),
    ) -> Result<SignatureTable, RegistryError> {
        let lock_file = self.lock()?;

        let result = self.load_from_disk().and_then(|mut table| {
            mutate(&mut table);
            self.save_to_disk(&table)?;
            Ok(table)
        });

        let _ = FileExt::unlock(&lock_file);
        result
    }
}

/// Registry location: `APKSIGN_REGISTRY_PATH`, else the user config dir
pub fn default_registry_path() -> PathBuf {
    if let Ok(path) = std::env::var(REGISTRY_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::config_dir()
        .map(|d| d.join("apksign/registry.toml"))
        .unwrap_or_else(|| PathBuf::from(".apksign/registry.toml"))
}

fn access(e: std::io::Error) -> RegistryError {
    RegistryError::AccessError {
        message: e.to_string(),
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(access)
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> Result<(), RegistryError> {
    Ok(())
}

fn from_toml(toml_registry: TomlRegistry) -> Result<SignatureTable, String> {
    let mut table = SignatureTable::new();
    table.version = toml_registry.version;
    for (name, e) in toml_registry.packages {
        let package = PackageId::parse(&name).map_err(|err| err.to_string())?;
        table.upsert(RegistryEntry {
            package,
            profile: SignProfile::new(e.keystore, e.alias, e.store_password, e.key_password),
            updated_at: e.updated_at,
        });
    }
    Ok(table)
}

fn to_toml(table: &SignatureTable) -> TomlRegistry {
    TomlRegistry {
        version: table.version,
        packages: table
            .all()
            .map(|entry| {
                (
                    entry.package.to_string(),
                    TomlEntry {
                        keystore: entry.profile.keystore().to_path_buf(),
                        alias: entry.profile.alias().to_string(),
                        store_password: entry.profile.store_password().to_string(),
                        key_password: entry.profile.key_password().to_string(),
                        updated_at: entry.updated_at,
                    },
                )
            })
            .collect(),
    }
}
