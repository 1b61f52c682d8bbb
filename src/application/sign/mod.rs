//! Sign Module
//!
//! Orchestrates batch signing: optional alignment, then one apksigner pass
//! per file.
//!
//! ## Structure
//!
//! - `options` - Request types (`SignOptions`, `SignRequest`)
//! - `result` - Result types (`BatchReport`)
//! - `use_case` - Core use case logic (`BatchSignUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use apksign::application::sign::{BatchSignUseCase, SignRequest};
//!
//! let use_case = BatchSignUseCase::new(runner, tools);
//! let report = use_case.execute(&SignRequest::new(files, profile), &events, &cancel);
//! let overall = report.merged()?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{SignOptions, SignRequest};
pub use result::BatchReport;
pub use use_case::BatchSignUseCase;
