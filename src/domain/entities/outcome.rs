//! Outcome entity - lifecycle of one signing (or inspection) attempt
//!
//! `NotStarted → InProgress → {Succeeded, Failed}` is the only legal path.
//! Going back to `NotStarted` requires an explicit [`Outcome::reset`].

use std::fmt;

/// Category of a per-file failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Tool path does not resolve to a runnable binary
    ProcessLaunchFailed,
    /// Tool exited nonzero or was killed
    ProcessExecutionFailed,
    /// Keystore missing/unreadable or empty alias/password
    InvalidProfile,
    /// Empty scheme set
    NoSchemeSelected,
    /// Input is not an `.apk`
    UnsupportedInput,
    /// Batch cancelled by the caller
    Cancelled,
    /// Local file system error around the tool invocation
    Io,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ProcessLaunchFailed => "process_launch_failed",
            FailureKind::ProcessExecutionFailed => "process_execution_failed",
            FailureKind::InvalidProfile => "invalid_profile",
            FailureKind::NoSchemeSelected => "no_scheme_selected",
            FailureKind::UnsupportedInput => "unsupported_input",
            FailureKind::Cancelled => "cancelled",
            FailureKind::Io => "io",
        }
    }
}

/// A failure with its category and human-readable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: FailureKind,
    message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "cancelled")
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Rejected state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal outcome transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// State of one attempt, generic over the success payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome<T> {
    #[default]
    NotStarted,
    InProgress,
    Succeeded(T),
    Failed(Failure),
}

impl<T> Outcome<T> {
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Failed(Failure::new(kind, message))
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Outcome::NotStarted => "not_started",
            Outcome::InProgress => "in_progress",
            Outcome::Succeeded(_) => "succeeded",
            Outcome::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Succeeded(_) | Outcome::Failed(_))
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// `NotStarted → InProgress`
    pub fn start(&mut self) -> Result<(), TransitionError> {
        match self {
            Outcome::NotStarted => {
                *self = Outcome::InProgress;
                Ok(())
            }
            other => Err(TransitionError {
                from: other.state_name(),
                to: "in_progress",
            }),
        }
    }

    /// `InProgress → Succeeded`
    pub fn succeed(&mut self, value: T) -> Result<(), TransitionError> {
        match self {
            Outcome::InProgress => {
                *self = Outcome::Succeeded(value);
                Ok(())
            }
            other => Err(TransitionError {
                from: other.state_name(),
                to: "succeeded",
            }),
        }
    }

    /// `InProgress → Failed`
    pub fn fail(&mut self, failure: Failure) -> Result<(), TransitionError> {
        match self {
            Outcome::InProgress => {
                *self = Outcome::Failed(failure);
                Ok(())
            }
            other => Err(TransitionError {
                from: other.state_name(),
                to: "failed",
            }),
        }
    }

    /// Caller acknowledged the result; back to `NotStarted`.
    pub fn reset(&mut self) {
        *self = Outcome::NotStarted;
    }

    /// Settle an in-progress outcome from a `Result`.
    pub fn settle(&mut self, result: Result<T, Failure>) -> Result<(), TransitionError> {
        match result {
            Ok(value) => self.succeed(value),
            Err(failure) => self.fail(failure),
        }
    }
}
