//! Common test utilities for apksign scenario and CLI tests.
//!
//! This module provides:
//! - `FakeTools`: shell-script stand-ins for zipalign, apksigner and aapt
//! - `SignEnv`: isolated temp directory with tools, keystore and registry,
//!   plus helpers to run the apksign binary against it
//!
//! The fake apksigner fails when the input file contains `CORRUPT`, and
//! `verify` fails for files containing `UNSIGNED`.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const ZIPALIGN: &str = r#"#!/bin/sh
# zipalign -p -f 4 <in> <out>
echo "Verifying alignment of $5 (4)..."
cp "$4" "$5"
echo "Verification succesful"
"#;

const APKSIGNER: &str = r#"#!/bin/sh
mode="$1"
shift
if [ "$mode" = "verify" ]; then
    for last in "$@"; do :; done
    if grep -q UNSIGNED "$last"; then
        echo "DOES NOT VERIFY" >&2
        echo "ERROR: Missing META-INF/MANIFEST.MF" >&2
        exit 1
    fi
    echo "Verifies"
    echo "Signer #1 certificate DN: CN=Fake Release"
    exit 0
fi
out=""
v4="false"
while [ $# -gt 1 ]; do
    case "$1" in
        --out) out="$2"; shift 2 ;;
        --v4-signing-enabled) v4="$2"; shift 2 ;;
        *) shift ;;
    esac
done
in="$1"
if [ -z "$APKSIGN_KS_PASS" ]; then
    echo "Failed to load signer: keystore password missing" >&2
    exit 2
fi
if grep -q CORRUPT "$in"; then
    echo "ERROR: $in is not a valid APK" >&2
    exit 1
fi
cp "$in" "$out"
if [ "$v4" = "true" ]; then
    echo "idsig" > "$out.idsig"
fi
echo "Signed"
"#;

const SLOW_APKSIGNER: &str = r#"#!/bin/sh
echo "loading keystore"
exec sleep 30
"#;

const AAPT: &str = r#"#!/bin/sh
# aapt dump badging <apk>
name=$(basename "$3" .apk)
echo "package: name='com.example.$name' versionCode='1' versionName='1.0'"
echo "application-label:'Example'"
"#;

/// Directory holding executable fake build tools
pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        Self::with_signer(APKSIGNER)
    }

    /// apksigner that never finishes on its own
    pub fn slow() -> Self {
        Self::with_signer(SLOW_APKSIGNER)
    }

    fn with_signer(apksigner: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_script(&dir.path().join("zipalign"), ZIPALIGN);
        write_script(&dir.path().join("apksigner"), apksigner);
        write_script(&dir.path().join("aapt"), AAPT);
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn zipalign(&self) -> PathBuf {
        self.dir.path().join("zipalign")
    }

    pub fn apksigner(&self) -> PathBuf {
        self.dir.path().join("apksigner")
    }

    pub fn aapt(&self) -> PathBuf {
        self.dir.path().join("aapt")
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Result of running the apksign binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated environment: work dir, fake tools, keystore, registry, HOME
pub struct SignEnv {
    pub root: TempDir,
    pub tools: FakeTools,
}

impl SignEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("home")).unwrap();
        fs::write(root.path().join("release.jks"), b"fake keystore").unwrap();
        Self {
            root,
            tools: FakeTools::new(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn keystore(&self) -> PathBuf {
        self.path("release.jks")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.path("registry.toml")
    }

    /// Create an input APK with `content`
    pub fn apk(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let home = self.path("home");
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_apksign"));
        cmd.current_dir(self.root.path())
            .args(args)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("APKSIGN_ZIPALIGN", self.tools.zipalign())
            .env("APKSIGN_APKSIGNER", self.tools.apksigner())
            .env("APKSIGN_AAPT", self.tools.aapt())
            .env("APKSIGN_REGISTRY_PATH", self.registry_path())
            .env_remove("APKSIGN_BUILD_TOOLS")
            .env_remove("APKSIGN_OUTPUT_DIR")
            .env_remove("APKSIGN_SCHEMES")
            .env_remove("APKSIGN_ZIP_ALIGN")
            .env_remove("APKSIGN_AUTO_MATCH")
            .env_remove("APKSIGN_STORE_PASSWORD")
            .env_remove("APKSIGN_KEY_PASSWORD")
            .env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute apksign");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
