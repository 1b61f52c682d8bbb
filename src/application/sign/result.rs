//! Batch Result
//!
//! Per-file outcomes of a batch, in input order.

use std::path::PathBuf;

use crate::domain::entities::Outcome;
use crate::domain::services::{merge, AggregateError};

#[derive(Debug, Clone)]
pub struct BatchReport<T> {
    pub files: Vec<PathBuf>,
    /// `outcomes[i]` belongs to `files[i]`
    pub outcomes: Vec<Outcome<T>>,
}

impl<T: Clone> BatchReport<T> {
    pub fn new(files: Vec<PathBuf>, outcomes: Vec<Outcome<T>>) -> Self {
        Self { files, outcomes }
    }

    /// Collapse into one overall outcome
    pub fn merged(&self) -> Result<Outcome<T>, AggregateError> {
        merge(&self.outcomes, &self.files)
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn is_success(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(Outcome::is_succeeded)
    }
}
