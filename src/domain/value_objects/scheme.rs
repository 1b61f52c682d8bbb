//! Scheme value object - APK signature scheme versions
//!
//! Several schemes can be applied to one package in a single `apksigner` pass.
//! Each scheme maps to one `--vN-signing-enabled` flag.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An APK signature scheme version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeVersion {
    /// JAR signing (META-INF manifest signatures)
    V1,
    /// APK Signature Scheme v2
    V2,
    /// APK Signature Scheme v3
    V3,
    /// APK Signature Scheme v4
    V4,
}

/// Ordered set of requested schemes
pub type SchemeSet = BTreeSet<SchemeVersion>;

impl SchemeVersion {
    pub const ALL: [SchemeVersion; 4] = [
        SchemeVersion::V1,
        SchemeVersion::V2,
        SchemeVersion::V3,
        SchemeVersion::V4,
    ];

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            SchemeVersion::V1 => "V1",
            SchemeVersion::V2 => "V2",
            SchemeVersion::V3 => "V3",
            SchemeVersion::V4 => "V4",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SchemeVersion::V1 => "JAR signing, required to install on Android 6.0 and lower",
            SchemeVersion::V2 => "Whole-file signature, verified on Android 7.0 and higher",
            SchemeVersion::V3 => "Supports key rotation, verified on Android 9 and higher",
            SchemeVersion::V4 => {
                "Streaming-install signature written to a separate .idsig file (Android 11+)"
            }
        }
    }

    /// The `apksigner sign` flag controlling this scheme
    pub fn apksigner_flag(&self) -> &'static str {
        match self {
            SchemeVersion::V1 => "--v1-signing-enabled",
            SchemeVersion::V2 => "--v2-signing-enabled",
            SchemeVersion::V3 => "--v3-signing-enabled",
            SchemeVersion::V4 => "--v4-signing-enabled",
        }
    }

    /// Schemes enabled when nothing is configured
    pub fn default_set() -> SchemeSet {
        [SchemeVersion::V1, SchemeVersion::V2].into_iter().collect()
    }
}

impl std::fmt::Display for SchemeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemeVersion::V1 => write!(f, "v1"),
            SchemeVersion::V2 => write!(f, "v2"),
            SchemeVersion::V3 => write!(f, "v3"),
            SchemeVersion::V4 => write!(f, "v4"),
        }
    }
}

/// Error for an unrecognized scheme name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signature scheme '{0}' (expected one of: v1, v2, v3, v4)")]
pub struct UnknownScheme(pub String);

impl FromStr for SchemeVersion {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(SchemeVersion::V1),
            "v2" | "2" => Ok(SchemeVersion::V2),
            "v3" | "3" => Ok(SchemeVersion::V3),
            "v4" | "4" => Ok(SchemeVersion::V4),
            _ => Err(UnknownScheme(s.to_string())),
        }
    }
}

/// Parse a comma-separated list such as `v1,v2`
pub fn parse_scheme_list(list: &str) -> Result<SchemeSet, UnknownScheme> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SchemeVersion::from_str)
        .collect()
}
