//! External tool adapters
//!
//! - `AndroidBuildTools`: `zipalign` / `apksigner` command lines
//! - `AaptIdentityResolver`: package name from `aapt dump badging`

mod aapt;
mod android;

pub use aapt::{parse_badging_package, AaptIdentityResolver};
pub use android::{AndroidBuildTools, KEY_PASS_ENV, KS_PASS_ENV};
