//! Compilation of the extension crate for the configured target.

use std::ffi::OsStr;
use std::path::Path;

use tracing::info;

use crate::artifact::BuildArtifact;
use crate::config::BuildConfig;
use crate::pipeline::types::CompileError;
use crate::toolchain::run_tool;

/// Run an optimized build for the configured target and return where the
/// compiled module is expected.
///
/// The target must already be provisioned. The returned path is computed, not
/// observed: whether the compiler actually wrote it is checked by the
/// relocation stage.
pub async fn compile(config: &BuildConfig) -> Result<BuildArtifact, CompileError> {
  let args = build_args(config.target(), config.build_root());

  info!(target = config.target(), crate_name = config.crate_name(), "compiling");
  run_tool(config.cargo(), &args, config.project_dir())
    .await?
    .check()?;

  Ok(config.build_artifact())
}

/// `--target-dir` is always passed so an inherited `CARGO_TARGET_DIR` can't
/// move the output away from the computed artifact path.
fn build_args<'a>(target: &'a str, build_root: &'a Path) -> [&'a OsStr; 6] {
  [
    OsStr::new("build"),
    OsStr::new("--release"),
    OsStr::new("--target"),
    OsStr::new(target),
    OsStr::new("--target-dir"),
    build_root.as_os_str(),
  ]
}
