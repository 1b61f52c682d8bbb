//! Batch Sign Use Case
//!
//! Per file:
//! 1. Reject non-`.apk` input and honor an already requested cancel
//! 2. Align into a private temp dir (optional)
//! 3. Sign once with every requested scheme into a `.part` file next to the
//!    final artifact
//! 4. Rename the `.part` file into place after exit 0, unless cancelled
//!
//! The profile and scheme preconditions are checked once for the whole
//! batch; when either fails, nothing is spawned. Artifact paths are planned
//! for the whole batch before the first tool runs, so no file overwrites an
//! input or another file's artifact.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::batch::{
    emit_finished, emit_settled, fail_all, process_failure, run_batch, SerializedSink,
};
use crate::domain::entities::{Failure, FailureKind, SignProfile};
use crate::domain::ports::{
    Invocation, ProcessRunner, SignEvent, SignEventSink, SignJob, SignStep, SigningTools,
};
use crate::domain::services::{aligned_file_name, is_apk, plan_signed_paths};
use crate::domain::value_objects::{CancellationToken, SchemeVersion};

use super::options::{SignOptions, SignRequest};
use super::result::BatchReport;

pub struct BatchSignUseCase {
    runner: Arc<dyn ProcessRunner>,
    tools: Arc<dyn SigningTools>,
}

impl BatchSignUseCase {
    pub fn new(runner: Arc<dyn ProcessRunner>, tools: Arc<dyn SigningTools>) -> Self {
        Self { runner, tools }
    }

    /// Sign every file of `request`, returning one outcome per file in order
    pub fn execute(
        &self,
        request: &SignRequest,
        events: &dyn SignEventSink,
        cancel: &CancellationToken,
    ) -> BatchReport<PathBuf> {
        let events = SerializedSink::new(events);
        let files = &request.files;
        let options = &request.options;

        events.on_event(SignEvent::BatchStarted {
            file_count: files.len(),
            zip_align: options.zip_align,
            schemes: options.schemes.iter().copied().collect(),
        });

        let outcomes = match batch_precondition(&request.profile, options) {
            Some(failure) => {
                warn!(reason = %failure, "batch rejected before signing");
                for (index, path) in files.iter().enumerate() {
                    let result: Result<PathBuf, Failure> = Err(failure.clone());
                    emit_settled(&events, index, path, &result, |_| None);
                }
                fail_all(files.len(), &failure)
            }
            None => {
                let output_dir = prepare_output_dir(options.output_dir.as_deref());
                let destinations = plan_signed_paths(files, output_dir.as_deref(), clash_key);
                run_batch(files, options.parallelism, |index, path| {
                    info!(file = %path.display(), "signing");
                    let result = self.sign_one(
                        index,
                        path,
                        &destinations[index],
                        &request.profile,
                        options,
                        &events,
                        cancel,
                    );
                    match &result {
                        Ok(out) => {
                            info!(file = %path.display(), output = %out.display(), "signed")
                        }
                        Err(failure) => info!(
                            file = %path.display(),
                            kind = failure.kind().as_str(),
                            "signing failed"
                        ),
                    }
                    emit_settled(&events, index, path, &result, |out| Some(out.clone()));
                    result
                })
            }
        };

        emit_finished(&events, &outcomes);
        BatchReport::new(files.clone(), outcomes)
    }

    #[allow(clippy::too_many_arguments)]
    fn sign_one(
        &self,
        index: usize,
        source: &Path,
        dest: &Path,
        profile: &SignProfile,
        options: &SignOptions,
        events: &dyn SignEventSink,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, Failure> {
        if !is_apk(source) {
            return Err(Failure::new(FailureKind::UnsupportedInput, "not an .apk file"));
        }
        if cancel.is_cancelled() {
            return Err(Failure::cancelled());
        }
        if !source.is_file() {
            return Err(Failure::new(FailureKind::Io, "input file not found"));
        }

        let dest_dir = match dest.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // Kept alive until signing finished; removed on drop.
        let align_dir;
        let sign_input = if options.zip_align {
            align_dir = tempfile::Builder::new()
                .prefix("apksign-align-")
                .tempdir()
                .map_err(io_failure)?;
            let aligned = align_dir.path().join(aligned_file_name(source));
            let invocation = self.tools.align(source, &aligned);
            self.run_step(index, source, SignStep::Align, &invocation, events, cancel)?;
            aligned
        } else {
            source.to_path_buf()
        };

        let part = tempfile::Builder::new()
            .prefix(".apksign-")
            .suffix(".apk.part")
            .tempfile_in(&dest_dir)
            .map_err(io_failure)?;
        let v4 = options.schemes.contains(&SchemeVersion::V4);
        let part_idsig = idsig_path(part.path());

        let job = SignJob {
            input: &sign_input,
            output: part.path(),
            profile,
            schemes: &options.schemes,
        };
        let invocation = self.tools.sign(&job);
        let signed = self.run_step(index, source, SignStep::Sign, &invocation, events, cancel);

        if let Err(failure) = signed {
            remove_if_exists(&part_idsig);
            return Err(failure);
        }
        if cancel.is_cancelled() {
            remove_if_exists(&part_idsig);
            return Err(Failure::cancelled());
        }

        // The .idsig goes first: once the APK is in place the file counts as signed.
        let dest_idsig = idsig_path(dest);
        let with_idsig = v4 && part_idsig.exists();
        if with_idsig {
            fs::rename(&part_idsig, &dest_idsig).map_err(|e| {
                remove_if_exists(&part_idsig);
                io_failure(e)
            })?;
        }
        part.persist(dest).map_err(|e| {
            if with_idsig {
                remove_if_exists(&dest_idsig);
            }
            io_failure(e.error)
        })?;

        Ok(dest.to_path_buf())
    }

    fn run_step(
        &self,
        index: usize,
        source: &Path,
        step: SignStep,
        invocation: &Invocation,
        events: &dyn SignEventSink,
        cancel: &CancellationToken,
    ) -> Result<(), Failure> {
        events.on_event(SignEvent::StepStarted {
            index,
            path: source.to_path_buf(),
            step,
        });

        let mut forward = |line: &str| {
            events.on_event(SignEvent::Line {
                index,
                path: source.to_path_buf(),
                line: line.to_string(),
            })
        };
        let report = self
            .runner
            .run(invocation, &mut forward, cancel)
            .map_err(process_failure)?;

        if report.success() {
            Ok(())
        } else {
            Err(Failure::new(
                FailureKind::ProcessExecutionFailed,
                report.diagnostic(),
            ))
        }
    }
}

/// First batch-wide reason to refuse signing
fn batch_precondition(profile: &SignProfile, options: &SignOptions) -> Option<Failure> {
    if let Err(problem) = profile.validate() {
        return Some(Failure::new(FailureKind::InvalidProfile, problem.to_string()));
    }
    if options.schemes.is_empty() {
        return Some(Failure::new(
            FailureKind::NoSchemeSelected,
            "no signature scheme selected",
        ));
    }
    None
}

/// Create the output directory, or fall back to writing next to each source
fn prepare_output_dir(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = dir?;
    match fs::create_dir_all(dir) {
        Ok(()) => Some(dir.to_path_buf()),
        Err(e) => {
            warn!(
                dir = %dir.display(),
                error = %e,
                "cannot create output directory, writing next to sources"
            );
            None
        }
    }
}

/// Identity of `path` for artifact planning: canonical when the file or its
/// directory exists, as given otherwise
fn clash_key(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (fs::canonicalize(dir), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// `<file>.idsig`, written by apksigner next to its output for v4
fn idsig_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(".idsig");
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) {
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}

fn io_failure(e: std::io::Error) -> Failure {
    Failure::new(FailureKind::Io, e.to_string())
}
