//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Choosing the event sink for the requested output format
//!
//! ## Structure
//!
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output format and event sink selection
//!
//! ## Usage
//!
//! ```ignore
//! use apksign::presentation::factory;
//!
//! let use_case = factory::create_sign_use_case(&config.tools);
//! let report = use_case.execute(&request, &sink, &cancel);
//! ```

pub mod factory;
pub mod output;

pub use factory::{
    create_identity_resolver, create_inspect_use_case, create_sign_use_case, open_registry,
    preflight_tools,
};
pub use output::{create_event_sink, OutputFormat};
