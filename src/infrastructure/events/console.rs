//! Console Event Sink
//!
//! Human-readable progress on stderr. Tool output lines are shown indented
//! under the file they belong to.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{SignEvent, SignEventSink};

struct Icons {
    check: &'static str,
    cross: &'static str,
    step: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            step: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            step: "->",
        }
    }
}

pub struct ConsoleEventSink {
    icons: Icons,
    show_lines: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    /// Progress on stderr; unicode icons only when stderr is a terminal
    pub fn stderr(show_lines: bool) -> Self {
        use is_terminal::IsTerminal;
        let unicode = io::stderr().is_terminal();
        Self::with_writer(io::stderr(), unicode, show_lines)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        unicode: bool,
        show_lines: bool,
    ) -> Self {
        Self {
            icons: if unicode {
                Icons::unicode()
            } else {
                Icons::ascii()
            },
            show_lines,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

impl SignEventSink for ConsoleEventSink {
    fn on_event(&self, event: SignEvent) {
        match event {
            SignEvent::BatchStarted {
                file_count,
                zip_align,
                schemes,
            } => {
                let schemes: Vec<String> = schemes.iter().map(|s| s.to_string()).collect();
                let align = if zip_align { ", aligned" } else { "" };
                self.write_line(format!(
                    "Processing {} file(s) [{}{}]",
                    file_count,
                    schemes.join(","),
                    align
                ));
            }
            SignEvent::StepStarted { path, step, .. } => {
                self.write_line(format!("{} {} {}", self.icons.step, step, path.display()));
            }
            SignEvent::Line { line, .. } => {
                if self.show_lines {
                    self.write_line(format!("    {}", line));
                }
            }
            SignEvent::FileSucceeded { path, output, .. } => match output {
                Some(out) => self.write_line(format!(
                    "{} {} -> {}",
                    self.icons.check,
                    path.display(),
                    out.display()
                )),
                None => self.write_line(format!("{} {}", self.icons.check, path.display())),
            },
            SignEvent::FileFailed { path, failure, .. } => {
                self.write_line(format!(
                    "{} {}: {}",
                    self.icons.cross,
                    path.display(),
                    failure.message()
                ));
            }
            SignEvent::BatchFinished { succeeded, failed } => {
                self.write_line(format!("{} succeeded, {} failed", succeeded, failed));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Failure, FailureKind};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn tool_lines_hidden_unless_requested() {
        let buffer = Buffer::default();
        let sink = ConsoleEventSink::with_writer(buffer.clone(), false, false);
        sink.on_event(SignEvent::Line {
            index: 0,
            path: PathBuf::from("a.apk"),
            line: "noise".to_string(),
        });
        assert_eq!(buffer.text(), "");

        let sink = ConsoleEventSink::with_writer(buffer.clone(), false, true);
        sink.on_event(SignEvent::Line {
            index: 0,
            path: PathBuf::from("a.apk"),
            line: "noise".to_string(),
        });
        assert_eq!(buffer.text(), "    noise\n");
    }

    #[test]
    fn failure_uses_ascii_icon_off_terminal() {
        let buffer = Buffer::default();
        let sink = ConsoleEventSink::with_writer(buffer.clone(), false, false);
        sink.on_event(SignEvent::FileFailed {
            index: 0,
            path: PathBuf::from("b.apk"),
            failure: Failure::new(FailureKind::InvalidProfile, "key alias is empty"),
        });
        assert_eq!(buffer.text(), "[FAIL] b.apk: key alias is empty\n");
    }
}
