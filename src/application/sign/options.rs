//! Sign Options
//!
//! Request types for batch signing.

use std::path::PathBuf;

use crate::domain::entities::SignProfile;
use crate::domain::value_objects::{SchemeSet, SchemeVersion};

/// How a batch is signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOptions {
    /// Destination for signed artifacts; next to each source when unset
    pub output_dir: Option<PathBuf>,
    /// Run zipalign before signing
    pub zip_align: bool,
    /// Schemes enabled in the single apksigner pass
    pub schemes: SchemeSet,
    /// Worker threads (at least one is used)
    pub parallelism: usize,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            zip_align: true,
            schemes: SchemeVersion::default_set(),
            parallelism: 1,
        }
    }
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_zip_align(mut self, zip_align: bool) -> Self {
        self.zip_align = zip_align;
        self
    }

    pub fn with_schemes(mut self, schemes: SchemeSet) -> Self {
        self.schemes = schemes;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }
}

/// One batch: files, the profile used for all of them, and options
#[derive(Debug, Clone)]
pub struct SignRequest {
    pub files: Vec<PathBuf>,
    pub profile: SignProfile,
    pub options: SignOptions,
}

impl SignRequest {
    pub fn new(files: Vec<PathBuf>, profile: SignProfile) -> Self {
        Self {
            files,
            profile,
            options: SignOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SignOptions) -> Self {
        self.options = options;
        self
    }
}
