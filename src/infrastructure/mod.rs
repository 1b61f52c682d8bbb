//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `events/` - Event sinks (console, NDJSON)
//! - `process/` - Subprocess execution and executable lookup
//! - `repositories/` - Registry persistence (TOML)
//! - `tools/` - zipalign / apksigner / aapt command lines

pub mod events;
pub mod process;
pub mod repositories;
pub mod tools;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use process::{resolve_executable, SystemProcessRunner};
pub use repositories::{default_registry_path, TomlRegistryRepository};
pub use tools::{AaptIdentityResolver, AndroidBuildTools};
