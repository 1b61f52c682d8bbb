//! Android SDK build-tools adapter
//!
//! Command lines for `zipalign` and `apksigner`. Keystore passwords travel
//! through the child's environment (`--ks-pass env:NAME`), never as
//! arguments.

use std::path::{Path, PathBuf};

use crate::domain::ports::{Invocation, SignJob, SigningTools};
use crate::domain::value_objects::SchemeVersion;

/// Child environment variable carrying the keystore password
pub const KS_PASS_ENV: &str = "APKSIGN_KS_PASS";
/// Child environment variable carrying the key password
pub const KEY_PASS_ENV: &str = "APKSIGN_KEY_PASS";

/// zipalign page alignment in bytes
const ALIGNMENT: &str = "4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidBuildTools {
    zipalign: PathBuf,
    apksigner: PathBuf,
}

impl AndroidBuildTools {
    pub fn new(zipalign: impl Into<PathBuf>, apksigner: impl Into<PathBuf>) -> Self {
        Self {
            zipalign: zipalign.into(),
            apksigner: apksigner.into(),
        }
    }

    pub fn zipalign(&self) -> &Path {
        &self.zipalign
    }

    pub fn apksigner(&self) -> &Path {
        &self.apksigner
    }
}

impl SigningTools for AndroidBuildTools {
    fn align(&self, input: &Path, output: &Path) -> Invocation {
        // -p page-aligns uncompressed .so files, -f overwrites the output
        Invocation::new(&self.zipalign)
            .args(["-p", "-f", ALIGNMENT])
            .arg(input)
            .arg(output)
    }

    fn sign(&self, job: &SignJob<'_>) -> Invocation {
        let mut inv = Invocation::new(&self.apksigner)
            .arg("sign")
            .arg("--ks")
            .arg(job.profile.keystore())
            .arg("--ks-key-alias")
            .arg(job.profile.alias())
            .arg("--ks-pass")
            .arg(format!("env:{}", KS_PASS_ENV))
            .arg("--key-pass")
            .arg(format!("env:{}", KEY_PASS_ENV));

        for scheme in SchemeVersion::ALL {
            let enabled = job.schemes.contains(&scheme);
            inv = inv
                .arg(scheme.apksigner_flag())
                .arg(if enabled { "true" } else { "false" });
        }

        inv.arg("--out")
            .arg(job.output)
            .arg(job.input)
            .env(KS_PASS_ENV, job.profile.store_password())
            .env(KEY_PASS_ENV, job.profile.key_password())
    }

    fn inspect(&self, apk: &Path) -> Invocation {
        Invocation::new(&self.apksigner)
            .args(["verify", "-v", "--print-certs"])
            .arg(apk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SignProfile;
    use crate::domain::value_objects::SchemeSet;

    fn tools() -> AndroidBuildTools {
        AndroidBuildTools::new("/sdk/zipalign", "/sdk/apksigner")
    }

    #[test]
    fn align_command_line() {
        let inv = tools().align(Path::new("/in/a.apk"), Path::new("/tmp/a-aligned.apk"));
        assert_eq!(
            inv.display_command(),
            "/sdk/zipalign -p -f 4 /in/a.apk /tmp/a-aligned.apk"
        );
    }

    #[test]
    fn sign_enables_selected_and_disables_the_rest() {
        let profile = SignProfile::new("/keys/release.jks", "upload", "storepw", "keypw");
        let schemes: SchemeSet = [SchemeVersion::V2, SchemeVersion::V3].into_iter().collect();
        let job = SignJob {
            input: Path::new("/tmp/a-aligned.apk"),
            output: Path::new("/out/a-signed.apk"),
            profile: &profile,
            schemes: &schemes,
        };

        let inv = tools().sign(&job);
        assert_eq!(
            inv.args_lossy(),
            vec![
                "sign",
                "--ks",
                "/keys/release.jks",
                "--ks-key-alias",
                "upload",
                "--ks-pass",
                "env:APKSIGN_KS_PASS",
                "--key-pass",
                "env:APKSIGN_KEY_PASS",
                "--v1-signing-enabled",
                "false",
                "--v2-signing-enabled",
                "true",
                "--v3-signing-enabled",
                "true",
                "--v4-signing-enabled",
                "false",
                "--out",
                "/out/a-signed.apk",
                "/tmp/a-aligned.apk",
            ]
        );
    }

    #[test]
    fn passwords_only_in_child_env() {
        let profile = SignProfile::new("/keys/release.jks", "upload", "storepw", "keypw");
        let schemes = SchemeVersion::default_set();
        let job = SignJob {
            input: Path::new("a.apk"),
            output: Path::new("b.apk"),
            profile: &profile,
            schemes: &schemes,
        };

        let inv = tools().sign(&job);
        for arg in inv.args_lossy() {
            assert!(!arg.contains("storepw") && !arg.contains("keypw"));
        }
        assert_eq!(
            inv.get_env(),
            &[
                (KS_PASS_ENV.to_string(), "storepw".to_string()),
                (KEY_PASS_ENV.to_string(), "keypw".to_string()),
            ]
        );
    }

    #[test]
    fn inspect_command_line() {
        let inv = tools().inspect(Path::new("/in/a.apk"));
        assert_eq!(
            inv.display_command(),
            "/sdk/apksigner verify -v --print-certs /in/a.apk"
        );
    }
}
