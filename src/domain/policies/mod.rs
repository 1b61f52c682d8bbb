//! Domain Policies
//!
//! Business rules consulted by use cases.

mod auto_match;

pub use auto_match::{AutoMatch, AutoMatchPolicy, NoMatchReason};
