//! Domain Layer
//!
//! This is the core of apksign - signing rules without process or disk I/O
//! wiring.
//!
//! ## Structure
//!
//! - `entities/` - Outcome, SignProfile, SignatureTable
//! - `value_objects/` - SchemeVersion, PackageId, CancellationToken
//! - `services/` - Result aggregation, artifact naming
//! - `policies/` - Auto-match rules
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No subprocesses** - Tools are only reached through the `ProcessRunner` port
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
