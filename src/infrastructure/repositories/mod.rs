//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod registry;

pub use registry::{default_registry_path, TomlRegistryRepository, REGISTRY_PATH_ENV};
