//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod package_identity;
pub mod process_runner;
pub mod registry_repository;
pub mod sign_events;
pub mod signing_tools;

pub use package_identity::{IdentityError, PackageIdentityResolver};
pub use process_runner::{
    ExitReport, Invocation, ProcessError, ProcessRunner, DIAGNOSTIC_TAIL_LINES,
};
pub use registry_repository::{RegistryError, RegistryRepository};
pub use sign_events::{NoopEventSink, RecordingEventSink, SignEvent, SignEventSink, SignStep};
pub use signing_tools::{SignJob, SigningTools};
