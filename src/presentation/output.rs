//! Output Rendering
//!
//! Picks the event sink for the requested output format.

use crate::domain::ports::SignEventSink;
use crate::infrastructure::{ConsoleEventSink, JsonEventSink};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable progress on stderr
    #[default]
    Text,
    /// NDJSON events on stdout
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Event sink for `command`
///
/// Text output shows raw tool lines only from `-v` upwards.
pub fn create_event_sink(
    format: OutputFormat,
    command: &'static str,
    verbose: u8,
) -> Box<dyn SignEventSink> {
    match format {
        OutputFormat::Json => Box::new(JsonEventSink::stdout(command)),
        OutputFormat::Text => Box::new(ConsoleEventSink::stderr(verbose > 0)),
    }
}
