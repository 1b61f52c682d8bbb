//! Result Aggregator
//!
//! Collapses the per-file outcomes of a batch into one overall outcome.
//!
//! Precedence: any `Failed` wins, then any `InProgress`, then any
//! `NotStarted`; only a batch where every file succeeded is `Succeeded`.

use std::path::Path;

use crate::domain::entities::{Failure, FailureKind, Outcome};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// Caller passed lists of different lengths (programming error)
    #[error("outcome count {outcomes} does not match file count {files}")]
    LengthMismatch { outcomes: usize, files: usize },

    #[error("no files selected")]
    NoFilesSelected,
}

/// Merge `outcomes[i]` (the result for `files[i]`) into one outcome.
///
/// A successful batch carries the first file's value. A failed batch carries
/// one `"<path>: <message>"` line per failed file, in input order.
pub fn merge<T, P>(outcomes: &[Outcome<T>], files: &[P]) -> Result<Outcome<T>, AggregateError>
where
    T: Clone,
    P: AsRef<Path>,
{
    if outcomes.len() != files.len() {
        return Err(AggregateError::LengthMismatch {
            outcomes: outcomes.len(),
            files: files.len(),
        });
    }
    if outcomes.is_empty() {
        return Err(AggregateError::NoFilesSelected);
    }

    let mut failed_lines = Vec::new();
    let mut failed_kinds = Vec::new();
    let mut any_in_progress = false;
    let mut any_not_started = false;

    for (outcome, file) in outcomes.iter().zip(files) {
        match outcome {
            Outcome::Failed(failure) => {
                failed_lines.push(format!(
                    "{}: {}",
                    file.as_ref().display(),
                    failure.message()
                ));
                failed_kinds.push(failure.kind());
            }
            Outcome::InProgress => any_in_progress = true,
            Outcome::NotStarted => any_not_started = true,
            Outcome::Succeeded(_) => {}
        }
    }

    if !failed_lines.is_empty() {
        let kind = common_kind(&failed_kinds);
        return Ok(Outcome::Failed(Failure::new(kind, failed_lines.join("\n"))));
    }
    if any_in_progress {
        return Ok(Outcome::InProgress);
    }
    if any_not_started {
        return Ok(Outcome::NotStarted);
    }

    match &outcomes[0] {
        Outcome::Succeeded(value) => Ok(Outcome::Succeeded(value.clone())),
        // Every element is Succeeded at this point.
        _ => Ok(Outcome::InProgress),
    }
}

fn common_kind(kinds: &[FailureKind]) -> FailureKind {
    match kinds.split_first() {
        Some((first, rest)) if rest.iter().all(|k| k == first) => *first,
        _ => FailureKind::ProcessExecutionFailed,
    }
}
