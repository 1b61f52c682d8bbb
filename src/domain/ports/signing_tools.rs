//! Signing Tools Port
//!
//! Turns the three tool operations the engine needs into concrete
//! invocations. The engine decides *when* to run them; implementations only
//! decide *how* the command line looks.

use std::path::Path;

use crate::domain::entities::SignProfile;
use crate::domain::ports::process_runner::Invocation;
use crate::domain::value_objects::SchemeSet;

/// Inputs of one signing pass
#[derive(Debug, Clone, Copy)]
pub struct SignJob<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub profile: &'a SignProfile,
    pub schemes: &'a SchemeSet,
}

pub trait SigningTools: Send + Sync {
    /// Align `input` into `output`
    fn align(&self, input: &Path, output: &Path) -> Invocation;

    /// Sign with every scheme of `job.schemes` in one invocation
    fn sign(&self, job: &SignJob<'_>) -> Invocation;

    /// Print a textual description of the package's signatures
    fn inspect(&self, apk: &Path) -> Invocation;
}
