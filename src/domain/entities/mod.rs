//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Outcome` - State of one signing or inspection attempt
//! - `SignProfile` - Keystore credentials handed to the signing tool
//! - `SignatureTable` - Package name to last-used profile mapping

mod outcome;
mod registry;
mod sign_profile;

pub use outcome::{Failure, FailureKind, Outcome, TransitionError};
pub use registry::{RegistryEntry, SignatureTable};
pub use sign_profile::{ProfileProblem, SignProfile};
