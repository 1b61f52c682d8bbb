//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::parse_scheme_list;
use crate::error::{ApkSignError, ApkSignResult};

use super::types::Config;
use super::ConfigWarning;

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ApkSignResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ApkSignError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from the explicit file, else the user config, else defaults
///
/// An explicit file must exist. A user config that fails to parse is an
/// error, not a fallback to defaults.
pub fn load_or_default(explicit: Option<&Path>) -> ApkSignResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match default_config_path() {
            Some(user_config) if user_config.exists() => load_with_warnings(&user_config)?,
            _ => (Config::default(), Vec::new()),
        },
    };

    Ok((with_env_overrides(config), warnings))
}

/// `~/.config/apksign/config.toml` (platform config dir)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("apksign/config.toml"))
}

/// Apply environment variable overrides (APKSIGN_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`. Empty values are ignored.
pub fn apply_env(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(dir) = var("APKSIGN_BUILD_TOOLS") {
        config.tools.build_tools = Some(PathBuf::from(dir));
    }
    if let Some(path) = var("APKSIGN_ZIPALIGN") {
        config.tools.zipalign = Some(PathBuf::from(path));
    }
    if let Some(path) = var("APKSIGN_APKSIGNER") {
        config.tools.apksigner = Some(PathBuf::from(path));
    }
    if let Some(path) = var("APKSIGN_AAPT") {
        config.tools.aapt = Some(PathBuf::from(path));
    }

    if let Some(dir) = var("APKSIGN_OUTPUT_DIR") {
        config.sign.output_dir = Some(PathBuf::from(dir));
    }

    // APKSIGN_ZIP_ALIGN
    if let Some(val) = var("APKSIGN_ZIP_ALIGN") {
        config.sign.zip_align = val.to_lowercase() != "false" && val != "0";
    }

    // APKSIGN_SCHEMES (comma-separated, unknown entries ignore the override)
    if let Some(list) = var("APKSIGN_SCHEMES") {
        match parse_scheme_list(&list) {
            Ok(set) if !set.is_empty() => config.sign.schemes = set.into_iter().collect(),
            Ok(_) => {}
            Err(e) => tracing::warn!("ignoring APKSIGN_SCHEMES: {}", e),
        }
    }

    // APKSIGN_AUTO_MATCH
    if let Some(val) = var("APKSIGN_AUTO_MATCH") {
        config.sign.auto_match = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(path) = var("APKSIGN_REGISTRY_PATH") {
        config.registry.path = Some(PathBuf::from(path));
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "tools",
        "build_tools",
        "zipalign",
        "apksigner",
        "aapt",
        "sign",
        "output_dir",
        "zip_align",
        "schemes",
        "parallelism",
        "auto_match",
        "registry",
        "path",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}
