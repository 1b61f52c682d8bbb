//! Executable resolution
//!
//! A program given with a directory component must name an existing,
//! executable file. A bare name is looked up on `PATH`.

use std::path::{Path, PathBuf};

use crate::domain::ports::ProcessError;

/// Resolve `program` to a runnable file, before anything is spawned
pub fn resolve_executable(program: &Path) -> Result<PathBuf, ProcessError> {
    if program.as_os_str().is_empty() {
        return Err(launch_failed(program, "no program configured"));
    }

    if program.components().count() > 1 || program.is_absolute() {
        return check_runnable(program).map(|()| program.to_path_buf());
    }

    find_in_path(program).ok_or_else(|| launch_failed(program, "not found on PATH"))
}

fn check_runnable(path: &Path) -> Result<(), ProcessError> {
    let metadata = std::fs::metadata(path).map_err(|_| launch_failed(path, "no such file"))?;
    if !metadata.is_file() {
        return Err(launch_failed(path, "not a regular file"));
    }
    if !is_executable(&metadata) {
        return Err(launch_failed(path, "file is not executable"));
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

fn find_in_path(binary: &Path) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for segment in std::env::split_paths(&path_var) {
        for name in candidate_names(binary) {
            let candidate = segment.join(&name);
            if check_runnable(&candidate).is_ok() {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(windows)]
fn candidate_names(binary: &Path) -> Vec<PathBuf> {
    let mut names = vec![binary.to_path_buf()];
    if binary.extension().is_none() {
        for ext in ["exe", "bat", "cmd"] {
            names.push(binary.with_extension(ext));
        }
    }
    names
}

#[cfg(not(windows))]
fn candidate_names(binary: &Path) -> Vec<PathBuf> {
    vec![binary.to_path_buf()]
}

fn launch_failed(program: &Path, reason: &str) -> ProcessError {
    ProcessError::LaunchFailed {
        program: program.to_path_buf(),
        reason: reason.to_string(),
    }
}
