//! Artifact naming rules
//!
//! Signed artifacts are named `<stem>-signed.apk`, next to the source or in
//! the chosen output directory. Within a batch, no artifact path equals any
//! input or another file's artifact; clashes get a `-signed-<n>` name.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const SIGNED_SUFFIX: &str = "-signed";
pub const ALIGNED_SUFFIX: &str = "-aligned";

/// Whether `path` looks like an APK (`.apk`, any case)
pub fn is_apk(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("apk"))
        .unwrap_or(false)
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string())
}

fn artifact_dir(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    output_dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_default()
}

/// Where the signed artifact for `source` goes when nothing else claims it
pub fn signed_artifact_path(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    // The suffix always lengthens the file name, so this cannot equal `source`.
    artifact_dir(source, output_dir).join(format!("{}{}.apk", stem(source), SIGNED_SUFFIX))
}

/// Artifact paths for a whole batch, one per source, in order
///
/// `key` maps a path to the identity used for clash detection (the caller
/// canonicalizes; tests pass paths through). Every input is reserved up
/// front, so an artifact never lands on a file still waiting to be signed.
pub fn plan_signed_paths<K>(
    sources: &[PathBuf],
    output_dir: Option<&Path>,
    key: K,
) -> Vec<PathBuf>
where
    K: Fn(&Path) -> PathBuf,
{
    let mut taken: HashSet<PathBuf> = sources.iter().map(|s| key(s.as_path())).collect();
    sources
        .iter()
        .map(|source| {
            let mut n = 0usize;
            loop {
                let candidate = match n {
                    0 => signed_artifact_path(source, output_dir),
                    n => artifact_dir(source, output_dir)
                        .join(format!("{}{}-{}.apk", stem(source), SIGNED_SUFFIX, n)),
                };
                if taken.insert(key(&candidate)) {
                    break candidate;
                }
                n += 1;
            }
        })
        .collect()
}

/// File name of the aligned intermediate copy
pub fn aligned_file_name(source: &Path) -> String {
    format!("{}{}.apk", stem(source), ALIGNED_SUFFIX)
}
