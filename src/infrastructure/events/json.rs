//! JSON Event Sink
//!
//! Outputs sign events as NDJSON for CI/automation consumption. Tool output
//! lines are forwarded one event per line.

use crate::domain::ports::{SignEvent, SignEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl SignEventSink for JsonEventSink {
    fn on_event(&self, event: SignEvent) {
        let command = self.command;
        let json = match event {
            SignEvent::BatchStarted {
                file_count,
                zip_align,
                schemes,
            } => serde_json::json!({
                "event": "start",
                "command": command,
                "file_count": file_count,
                "zip_align": zip_align,
                "schemes": schemes,
            }),

            SignEvent::StepStarted { index, path, step } => serde_json::json!({
                "event": "step_start",
                "command": command,
                "index": index,
                "path": path.display().to_string(),
                "step": step.as_str(),
            }),

            SignEvent::Line { index, path, line } => serde_json::json!({
                "event": "line",
                "command": command,
                "index": index,
                "path": path.display().to_string(),
                "line": line,
            }),

            SignEvent::FileSucceeded {
                index,
                path,
                output,
            } => serde_json::json!({
                "event": "item_done",
                "command": command,
                "index": index,
                "path": path.display().to_string(),
                "output": output.map(|p| p.display().to_string()),
            }),

            SignEvent::FileFailed {
                index,
                path,
                failure,
            } => serde_json::json!({
                "event": "item_error",
                "command": command,
                "index": index,
                "path": path.display().to_string(),
                "kind": failure.kind().as_str(),
                "error": failure.message(),
            }),

            SignEvent::BatchFinished { succeeded, failed } => {
                let status = if failed == 0 { "success" } else { "failure" };
                serde_json::json!({
                    "event": "complete",
                    "command": command,
                    "status": status,
                    "succeeded": succeeded,
                    "failed": failed,
                })
            }
        };

        self.write_event(json);
    }
}
