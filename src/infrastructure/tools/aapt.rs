//! Package identity via `aapt dump badging`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{IdentityError, Invocation, PackageIdentityResolver, ProcessRunner};
use crate::domain::value_objects::{CancellationToken, PackageId};

pub struct AaptIdentityResolver {
    runner: Arc<dyn ProcessRunner>,
    aapt: Option<PathBuf>,
}

impl AaptIdentityResolver {
    pub fn new(runner: Arc<dyn ProcessRunner>, aapt: Option<PathBuf>) -> Self {
        Self { runner, aapt }
    }
}

impl PackageIdentityResolver for AaptIdentityResolver {
    fn resolve(&self, apk: &Path) -> Result<PackageId, IdentityError> {
        let aapt = self.aapt.as_ref().ok_or(IdentityError::NotConfigured)?;
        let invocation = Invocation::new(aapt).args(["dump", "badging"]).arg(apk);

        let mut name: Option<String> = None;
        let report = self
            .runner
            .run(
                &invocation,
                &mut |line| {
                    if name.is_none() {
                        name = parse_badging_package(line).map(str::to_string);
                    }
                },
                &CancellationToken::new(),
            )
            .map_err(|e| IdentityError::ToolFailed {
                path: apk.to_path_buf(),
                message: e.to_string(),
            })?;

        if !report.success() {
            return Err(IdentityError::ToolFailed {
                path: apk.to_path_buf(),
                message: report.diagnostic(),
            });
        }

        let name = name.ok_or_else(|| IdentityError::NotFound {
            path: apk.to_path_buf(),
        })?;
        PackageId::parse(&name).map_err(|source| IdentityError::Invalid {
            path: apk.to_path_buf(),
            source,
        })
    }
}

/// Extract `name` from a `package: name='…' versionCode='…'` badging line
pub fn parse_badging_package(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("package:")?;
    let start = rest.find("name='")? + "name='".len();
    let value = &rest[start..];
    let end = value.find('\'')?;
    Some(&value[..end])
}
