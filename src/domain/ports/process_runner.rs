//! Process Runner Port
//!
//! Abstracts launching one external tool and streaming its output.
//! The system implementation lives in `infrastructure::process`; tests use
//! scripted fakes.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::CancellationToken;

/// Number of trailing output lines kept for failure diagnostics
pub const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// One external command to run
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    env: Vec<(String, String)>,
    working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Environment variable for the child only. Values are treated as secrets.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Arguments as lossy UTF-8 strings
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Command line for logs. Environment values are never included.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args_lossy());
        parts.join(" ")
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self.env.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Invocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env", &env_keys)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

/// Final status of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Last [`DIAGNOSTIC_TAIL_LINES`] lines of combined output
    pub tail: Vec<String>,
}

impl ExitReport {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Captured output tail, or a status description when the tool was silent
    pub fn diagnostic(&self) -> String {
        let text = self.tail.join("\n");
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
        match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to launch '{program}': {reason}")]
    LaunchFailed { program: PathBuf, reason: String },

    #[error("'{program}' was cancelled")]
    Cancelled { program: PathBuf },

    #[error("I/O error while running '{program}': {message}")]
    Io { program: PathBuf, message: String },
}

/// Runs one external process to completion
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation`, calling `on_line` for every output line as it arrives.
    ///
    /// Launch problems are reported before any line is emitted. A nonzero
    /// exit is not an error: it comes back as an [`ExitReport`] after all
    /// produced output was delivered.
    fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut dyn FnMut(&str),
        cancel: &CancellationToken,
    ) -> Result<ExitReport, ProcessError>;
}
