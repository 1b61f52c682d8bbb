//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::policies::AutoMatchPolicy;
use crate::domain::value_objects::{SchemeSet, SchemeVersion};
use crate::error::ApkSignResult;

use super::loader;
use super::ConfigWarning;

/// Paths of the external tools
///
/// Each tool resolves to its explicit path, else `<build_tools>/<name>`,
/// else the bare name looked up on `PATH`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Android SDK build-tools directory (e.g. `~/Android/Sdk/build-tools/34.0.0`)
    #[serde(default)]
    pub build_tools: Option<PathBuf>,

    #[serde(default)]
    pub zipalign: Option<PathBuf>,

    #[serde(default)]
    pub apksigner: Option<PathBuf>,

    #[serde(default)]
    pub aapt: Option<PathBuf>,
}

impl ToolsConfig {
    pub fn zipalign_path(&self) -> PathBuf {
        self.tool_path(self.zipalign.as_deref(), "zipalign")
    }

    pub fn apksigner_path(&self) -> PathBuf {
        self.tool_path(self.apksigner.as_deref(), apksigner_name())
    }

    /// Explicit or build-tools `aapt`; `None` when neither is configured
    pub fn configured_aapt(&self) -> Option<PathBuf> {
        self.aapt.clone().or_else(|| {
            self.build_tools
                .as_ref()
                .map(|dir| dir.join(exe_name("aapt")))
        })
    }

    fn tool_path(&self, explicit: Option<&Path>, name: &str) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match &self.build_tools {
            Some(dir) => dir.join(exe_name(name)),
            None => PathBuf::from(name),
        }
    }
}

#[cfg(windows)]
fn apksigner_name() -> &'static str {
    "apksigner.bat"
}

#[cfg(not(windows))]
fn apksigner_name() -> &'static str {
    "apksigner"
}

fn exe_name(name: &str) -> String {
    if cfg!(windows) && !name.contains('.') {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Signing defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignConfig {
    /// Where signed artifacts go; next to each source when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub zip_align: bool,

    #[serde(default = "default_schemes")]
    pub schemes: Vec<SchemeVersion>,

    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Suggest and remember profiles per package
    #[serde(default = "default_true")]
    pub auto_match: bool,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            zip_align: true,
            schemes: default_schemes(),
            parallelism: default_parallelism(),
            auto_match: true,
        }
    }
}

impl SignConfig {
    pub fn scheme_set(&self) -> SchemeSet {
        self.schemes.iter().copied().collect()
    }

    pub fn auto_match_policy(&self) -> AutoMatchPolicy {
        AutoMatchPolicy::new(self.auto_match)
    }
}

fn default_true() -> bool {
    true
}

fn default_schemes() -> Vec<SchemeVersion> {
    SchemeVersion::default_set().into_iter().collect()
}

fn default_parallelism() -> usize {
    1
}

/// Registry location
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub sign: SignConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ApkSignResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ApkSignResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the user config, or defaults, then apply
    /// `APKSIGN_*` overrides
    pub fn load_or_default(explicit: Option<&Path>) -> ApkSignResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (APKSIGN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
