//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cancellation;
mod config_warning;
mod package_id;
mod scheme;

pub use cancellation::CancellationToken;
pub use config_warning::ConfigWarning;
pub use package_id::{PackageId, PackageIdError};
pub use scheme::{parse_scheme_list, SchemeSet, SchemeVersion, UnknownScheme};
