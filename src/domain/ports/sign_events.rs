//! Sign Event Port
//!
//! Provides an observable interface for batch signing and inspection.
//! Every tool output line is delivered as a [`SignEvent::Line`], which is
//! how progress reaches the caller.

use std::path::PathBuf;

use crate::domain::entities::Failure;
use crate::domain::value_objects::SchemeVersion;

/// Tool step within one file's processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStep {
    Align,
    Sign,
    Inspect,
}

impl SignStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignStep::Align => "align",
            SignStep::Sign => "sign",
            SignStep::Inspect => "inspect",
        }
    }
}

impl std::fmt::Display for SignStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event emitted during a batch
#[derive(Debug, Clone, PartialEq)]
pub enum SignEvent {
    /// Batch accepted and about to start
    BatchStarted {
        file_count: usize,
        zip_align: bool,
        schemes: Vec<SchemeVersion>,
    },

    /// A tool step started for a file
    StepStarted {
        index: usize,
        path: PathBuf,
        step: SignStep,
    },

    /// One line of tool output
    Line {
        index: usize,
        path: PathBuf,
        line: String,
    },

    /// File finished successfully; `output` is the signed artifact when signing
    FileSucceeded {
        index: usize,
        path: PathBuf,
        output: Option<PathBuf>,
    },

    /// File failed
    FileFailed {
        index: usize,
        path: PathBuf,
        failure: Failure,
    },

    /// All files settled
    BatchFinished { succeeded: usize, failed: usize },
}

/// Trait for receiving sign events
///
/// Implementations can be:
/// - ConsoleEventSink: human-readable progress
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait SignEventSink: Send + Sync {
    fn on_event(&self, event: SignEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SignEventSink for NoopEventSink {
    fn on_event(&self, _event: SignEvent) {}
}

/// Sink that keeps every event in memory (tests, summaries)
#[derive(Default)]
pub struct RecordingEventSink {
    events: std::sync::Mutex<Vec<SignEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SignEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Output lines emitted for file `index`, in delivery order
    pub fn lines_for(&self, index: usize) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SignEvent::Line { index: i, line, .. } if i == index => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl SignEventSink for RecordingEventSink {
    fn on_event(&self, event: SignEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
