//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::{BatchSignUseCase, InspectUseCase, SignatureRegistry};
use crate::config::{Config, ToolsConfig};
use crate::domain::ports::ProcessRunner;
use crate::error::{ApkSignError, ApkSignResult};
use crate::infrastructure::{
    default_registry_path, resolve_executable, AaptIdentityResolver, AndroidBuildTools,
    SystemProcessRunner, TomlRegistryRepository,
};

fn create_runner() -> Arc<dyn ProcessRunner> {
    Arc::new(SystemProcessRunner::new())
}

fn create_build_tools(tools: &ToolsConfig) -> Arc<AndroidBuildTools> {
    Arc::new(AndroidBuildTools::new(
        tools.zipalign_path(),
        tools.apksigner_path(),
    ))
}

/// Create a batch sign use case driving the configured build tools
pub fn create_sign_use_case(tools: &ToolsConfig) -> BatchSignUseCase {
    BatchSignUseCase::new(create_runner(), create_build_tools(tools))
}

/// Create an inspect use case driving the configured `apksigner`
pub fn create_inspect_use_case(tools: &ToolsConfig) -> InspectUseCase {
    InspectUseCase::new(create_runner(), create_build_tools(tools))
}

/// Create the package identity resolver
///
/// Uses the configured `aapt`, else `aapt` on `PATH` when present. Without
/// either, resolving reports `NotConfigured`.
pub fn create_identity_resolver(tools: &ToolsConfig) -> AaptIdentityResolver {
    let aapt = tools.configured_aapt().or_else(|| {
        let bare = Path::new("aapt");
        resolve_executable(bare).ok().map(|_| bare.to_path_buf())
    });
    AaptIdentityResolver::new(create_runner(), aapt)
}

/// Open the signature registry at the configured or default location
pub fn open_registry(config: &Config) -> ApkSignResult<SignatureRegistry> {
    let path = config
        .registry
        .path
        .clone()
        .unwrap_or_else(default_registry_path);
    let repository = Arc::new(TomlRegistryRepository::with_path(path));
    Ok(SignatureRegistry::open(repository)?)
}

/// Check that the tools a sign batch needs resolve to runnable binaries
pub fn preflight_tools(tools: &ToolsConfig, zip_align: bool) -> ApkSignResult<()> {
    if zip_align {
        check_tool("zipalign", "APKSIGN_ZIPALIGN", &tools.zipalign_path())?;
    }
    check_tool("apksigner", "APKSIGN_APKSIGNER", &tools.apksigner_path())
}

fn check_tool(tool: &'static str, env: &'static str, path: &Path) -> ApkSignResult<()> {
    resolve_executable(path)
        .map(|_| ())
        .map_err(|e| ApkSignError::ToolsNotConfigured {
            tool,
            env,
            reason: e.to_string(),
        })
}
