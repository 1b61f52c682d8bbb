//! Auto-match policy
//!
//! Decides when a stored profile may be suggested for the current selection:
//! 1. auto-matching is enabled,
//! 2. exactly one file is selected,
//! 3. that file's package has an entry,
//! 4. the stored profile is still valid on the current file system.

use crate::domain::entities::{ProfileProblem, SignProfile};
use crate::domain::value_objects::PackageId;

/// Why no profile was suggested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoMatchReason {
    Disabled,
    /// Selection size other than one
    NotSingleFile(usize),
    IdentityUnavailable(String),
    NoEntry(PackageId),
    StaleProfile {
        package: PackageId,
        problem: ProfileProblem,
    },
}

impl std::fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoMatchReason::Disabled => write!(f, "auto-match is disabled"),
            NoMatchReason::NotSingleFile(n) => {
                write!(f, "auto-match needs exactly one file ({} selected)", n)
            }
            NoMatchReason::IdentityUnavailable(msg) => {
                write!(f, "package identity unavailable: {}", msg)
            }
            NoMatchReason::NoEntry(id) => write!(f, "no profile recorded for {}", id),
            NoMatchReason::StaleProfile { package, problem } => {
                write!(f, "recorded profile for {} is no longer valid: {}", package, problem)
            }
        }
    }
}

/// Result of consulting the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoMatch {
    Suggested {
        package: PackageId,
        profile: SignProfile,
    },
    NoMatch(NoMatchReason),
}

impl AutoMatch {
    pub fn profile(&self) -> Option<&SignProfile> {
        match self {
            AutoMatch::Suggested { profile, .. } => Some(profile),
            AutoMatch::NoMatch(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoMatchPolicy {
    enabled: bool,
}

impl Default for AutoMatchPolicy {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AutoMatchPolicy {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Gate checked before any identity lookup or registry read
    pub fn precheck(&self, selection_len: usize) -> Result<(), NoMatchReason> {
        if !self.enabled {
            return Err(NoMatchReason::Disabled);
        }
        if selection_len != 1 {
            return Err(NoMatchReason::NotSingleFile(selection_len));
        }
        Ok(())
    }

    /// Judge a registry lookup result for `package`
    pub fn judge(&self, package: PackageId, stored: Option<SignProfile>) -> AutoMatch {
        let Some(profile) = stored else {
            return AutoMatch::NoMatch(NoMatchReason::NoEntry(package));
        };
        match profile.validate() {
            Ok(()) => AutoMatch::Suggested { package, profile },
            Err(problem) => AutoMatch::NoMatch(NoMatchReason::StaleProfile { package, problem }),
        }
    }

    /// Whether a just-used profile should be recorded for the selection
    pub fn should_record(&self, selection_len: usize) -> bool {
        self.precheck(selection_len).is_ok()
    }
}
