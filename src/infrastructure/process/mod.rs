//! Process execution
//!
//! `SystemProcessRunner` implements the `ProcessRunner` port with
//! `std::process`.

mod resolve;
mod system;

pub use resolve::resolve_executable;
pub use system::SystemProcessRunner;
