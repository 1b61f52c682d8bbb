//! Registry Module
//!
//! Remembers which signing profile was last used for each package.

mod use_case;

pub use use_case::SignatureRegistry;
