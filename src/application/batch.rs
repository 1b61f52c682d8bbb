//! Batch scheduling shared by signing and inspection
//!
//! Files are pulled from a shared index by up to `parallelism` scoped
//! threads. Every file's outcome goes `NotStarted → InProgress → terminal`,
//! and results come back in input order.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::thread;

use tracing::error;

use crate::domain::entities::{Failure, FailureKind, Outcome};
use crate::domain::ports::{ProcessError, SignEvent, SignEventSink};

/// Forwards events to `inner` one at a time
pub(crate) struct SerializedSink<'a> {
    inner: &'a dyn SignEventSink,
    gate: Mutex<()>,
}

impl<'a> SerializedSink<'a> {
    pub(crate) fn new(inner: &'a dyn SignEventSink) -> Self {
        Self {
            inner,
            gate: Mutex::new(()),
        }
    }
}

impl SignEventSink for SerializedSink<'_> {
    fn on_event(&self, event: SignEvent) {
        let _guard = lock(&self.gate);
        self.inner.on_event(event);
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `work` for every file and collect one outcome per file, in order
pub(crate) fn run_batch<T, F>(files: &[PathBuf], parallelism: usize, work: F) -> Vec<Outcome<T>>
where
    T: Send,
    F: Fn(usize, &Path) -> Result<T, Failure> + Sync,
{
    let slots: Vec<Mutex<Outcome<T>>> = files
        .iter()
        .map(|_| Mutex::new(Outcome::NotStarted))
        .collect();
    let next = AtomicUsize::new(0);
    let workers = parallelism.clamp(1, files.len().max(1));

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::SeqCst);
                let Some(path) = files.get(index) else {
                    break;
                };
                let slot = &slots[index];

                if let Err(e) = lock(slot).start() {
                    error!(%e, path = %path.display(), "outcome already started");
                    continue;
                }
                let result = work(index, path);
                if let Err(e) = lock(slot).settle(result) {
                    error!(%e, path = %path.display(), "outcome could not settle");
                }
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| slot.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()))
        .collect()
}

/// Fail every file with the same failure, without running anything
pub(crate) fn fail_all<T>(count: usize, failure: &Failure) -> Vec<Outcome<T>> {
    (0..count)
        .map(|_| {
            let mut outcome = Outcome::NotStarted;
            let _ = outcome.start();
            let _ = outcome.fail(failure.clone());
            outcome
        })
        .collect()
}

/// Per-file failure for a runner error
pub(crate) fn process_failure(err: ProcessError) -> Failure {
    match err {
        ProcessError::LaunchFailed { .. } => {
            Failure::new(FailureKind::ProcessLaunchFailed, err.to_string())
        }
        ProcessError::Cancelled { .. } => Failure::cancelled(),
        ProcessError::Io { .. } => Failure::new(FailureKind::Io, err.to_string()),
    }
}

/// Emit the terminal event for a settled file
pub(crate) fn emit_settled<T>(
    events: &dyn SignEventSink,
    index: usize,
    path: &Path,
    result: &Result<T, Failure>,
    output: impl FnOnce(&T) -> Option<PathBuf>,
) {
    let event = match result {
        Ok(value) => SignEvent::FileSucceeded {
            index,
            path: path.to_path_buf(),
            output: output(value),
        },
        Err(failure) => SignEvent::FileFailed {
            index,
            path: path.to_path_buf(),
            failure: failure.clone(),
        },
    };
    events.on_event(event);
}

/// `BatchFinished` for a completed list of outcomes
pub(crate) fn emit_finished<T>(events: &dyn SignEventSink, outcomes: &[Outcome<T>]) {
    let succeeded = outcomes.iter().filter(|o| o.is_succeeded()).count();
    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    events.on_event(SignEvent::BatchFinished { succeeded, failed });
}
