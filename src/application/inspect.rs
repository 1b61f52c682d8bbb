//! Inspect Use Case
//!
//! Read-only signature query: runs the signing tool's verify mode per file
//! and keeps its printed output as the success value.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::application::batch::{
    emit_finished, emit_settled, process_failure, run_batch, SerializedSink,
};
use crate::application::sign::BatchReport;
use crate::domain::entities::{Failure, FailureKind};
use crate::domain::ports::{ProcessRunner, SignEvent, SignEventSink, SignStep, SigningTools};
use crate::domain::services::is_apk;
use crate::domain::value_objects::CancellationToken;

pub struct InspectUseCase {
    runner: Arc<dyn ProcessRunner>,
    tools: Arc<dyn SigningTools>,
}

impl InspectUseCase {
    pub fn new(runner: Arc<dyn ProcessRunner>, tools: Arc<dyn SigningTools>) -> Self {
        Self { runner, tools }
    }

    pub fn execute(
        &self,
        files: &[PathBuf],
        parallelism: usize,
        events: &dyn SignEventSink,
        cancel: &CancellationToken,
    ) -> BatchReport<String> {
        let events = SerializedSink::new(events);
        events.on_event(SignEvent::BatchStarted {
            file_count: files.len(),
            zip_align: false,
            schemes: Vec::new(),
        });

        let outcomes = run_batch(files, parallelism, |index, path| {
            info!(file = %path.display(), "inspecting");
            let result = self.inspect_one(index, path, &events, cancel);
            emit_settled(&events, index, path, &result, |_| None);
            result
        });

        emit_finished(&events, &outcomes);
        BatchReport::new(files.to_vec(), outcomes)
    }

    fn inspect_one(
        &self,
        index: usize,
        path: &Path,
        events: &dyn SignEventSink,
        cancel: &CancellationToken,
    ) -> Result<String, Failure> {
        if !is_apk(path) {
            return Err(Failure::new(FailureKind::UnsupportedInput, "not an .apk file"));
        }
        if cancel.is_cancelled() {
            return Err(Failure::cancelled());
        }

        events.on_event(SignEvent::StepStarted {
            index,
            path: path.to_path_buf(),
            step: SignStep::Inspect,
        });

        let mut captured: Vec<String> = Vec::new();
        let invocation = self.tools.inspect(path);
        let report = self
            .runner
            .run(
                &invocation,
                &mut |line| {
                    captured.push(line.to_string());
                    events.on_event(SignEvent::Line {
                        index,
                        path: path.to_path_buf(),
                        line: line.to_string(),
                    });
                },
                cancel,
            )
            .map_err(process_failure)?;

        if report.success() {
            Ok(captured.join("\n"))
        } else {
            Err(Failure::new(
                FailureKind::ProcessExecutionFailed,
                report.diagnostic(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Outcome;
    use crate::domain::ports::{ExitReport, Invocation, ProcessError, RecordingEventSink};
    use crate::infrastructure::tools::AndroidBuildTools;

    struct VerifyRunner;

    impl ProcessRunner for VerifyRunner {
        fn run(
            &self,
            invocation: &Invocation,
            on_line: &mut dyn FnMut(&str),
            _cancel: &CancellationToken,
        ) -> Result<ExitReport, ProcessError> {
            let apk = invocation.args_lossy().last().cloned().unwrap_or_default();
            if apk.contains("unsigned") {
                on_line("DOES NOT VERIFY");
                on_line("ERROR: Missing META-INF/MANIFEST.MF");
                return Ok(ExitReport {
                    code: Some(1),
                    tail: vec![
                        "DOES NOT VERIFY".to_string(),
                        "ERROR: Missing META-INF/MANIFEST.MF".to_string(),
                    ],
                });
            }
            let lines = [
                "Verifies",
                "Verified using v1 scheme (JAR signing): true",
                "Signer #1 certificate DN: CN=Example",
            ];
            for line in lines {
                on_line(line);
            }
            Ok(ExitReport {
                code: Some(0),
                tail: lines.iter().map(|l| l.to_string()).collect(),
            })
        }
    }

    fn use_case() -> InspectUseCase {
        InspectUseCase::new(
            Arc::new(VerifyRunner),
            Arc::new(AndroidBuildTools::new("zipalign", "apksigner")),
        )
    }

    #[test]
    fn captures_tool_output_as_value() {
        let files = vec![PathBuf::from("/in/app.apk")];
        let events = RecordingEventSink::new();
        let report = use_case().execute(&files, 1, &events, &CancellationToken::new());

        let text = report.outcomes[0].value().unwrap();
        assert!(text.starts_with("Verifies\n"));
        assert!(text.contains("CN=Example"));
        assert_eq!(events.lines_for(0).len(), 3);
    }

    #[test]
    fn unsigned_file_fails_and_merges_with_path() {
        let files = vec![
            PathBuf::from("/in/app.apk"),
            PathBuf::from("/in/unsigned.apk"),
        ];
        let report = use_case().execute(
            &files,
            2,
            &RecordingEventSink::new(),
            &CancellationToken::new(),
        );

        assert!(report.outcomes[0].is_succeeded());
        let merged = report.merged().unwrap();
        let failure = merged.failure().unwrap();
        assert_eq!(failure.kind(), FailureKind::ProcessExecutionFailed);
        assert!(failure
            .message()
            .starts_with("/in/unsigned.apk: DOES NOT VERIFY"));
    }

    #[test]
    fn non_apk_is_rejected_without_running() {
        let report = use_case().execute(
            &[PathBuf::from("notes.txt")],
            1,
            &RecordingEventSink::new(),
            &CancellationToken::new(),
        );
        assert_eq!(
            report.outcomes[0].failure().unwrap().kind(),
            FailureKind::UnsupportedInput
        );
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = use_case().execute(
            &[PathBuf::from("a.apk")],
            1,
            &RecordingEventSink::new(),
            &cancel,
        );
        assert!(matches!(
            &report.outcomes[0],
            Outcome::Failed(f) if f.kind() == FailureKind::Cancelled
        ));
    }
}
