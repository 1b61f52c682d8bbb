//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BatchSignUseCase` - Align and sign a batch of APKs
//! - `InspectUseCase` - Print the signatures of a batch of APKs
//! - `SignatureRegistry` - Package to profile memory and auto-match

mod batch;
pub mod inspect;
pub mod registry;
pub mod sign;

pub use inspect::InspectUseCase;
pub use registry::SignatureRegistry;
pub use sign::{BatchReport, BatchSignUseCase, SignOptions, SignRequest};
