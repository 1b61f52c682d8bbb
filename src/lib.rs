//! apksign - batch APK signing orchestrator
//!
//! Drives the Android build tools (`zipalign`, `apksigner`, `aapt`) over a
//! batch of APKs, reports per-file outcomes through an event sink, merges
//! them into one verdict and remembers which keystore signed each package.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    BatchReport, BatchSignUseCase, InspectUseCase, SignOptions, SignRequest, SignatureRegistry,
};
pub use config::Config;
pub use domain::entities::{Failure, FailureKind, Outcome, SignProfile};
pub use domain::services::merge;
pub use domain::value_objects::{CancellationToken, PackageId, SchemeSet, SchemeVersion};
pub use error::{ApkSignError, ApkSignResult};
