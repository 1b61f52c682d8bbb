//! Domain Services
//!
//! Stateless business logic operating on domain entities.

pub mod aggregator;
pub mod artifact_naming;

pub use aggregator::{merge, AggregateError};
pub use artifact_naming::{aligned_file_name, is_apk, plan_signed_paths};
