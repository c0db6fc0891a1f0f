//! Toolchain provisioning: make sure the compilation target is installed.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::pipeline::types::ToolchainError;
use crate::toolchain::run_tool;

/// What provisioning had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provisioned {
  /// The target was already installed; nothing was changed.
  AlreadyInstalled,
  /// The target was added by this call.
  Installed,
}

/// Ensure the configured target is installed.
///
/// Installed targets are listed first, so a second call for the same target
/// runs no mutating command at all.
pub async fn ensure(config: &BuildConfig) -> Result<Provisioned, ToolchainError> {
  let rustup = config.rustup();
  let target = config.target();
  let cwd = config.project_dir();

  let listed = run_tool(rustup, &["target", "list", "--installed"], cwd)
    .await?
    .check()?;

  if is_listed(&listed.stdout, target) {
    debug!(target, "target already installed");
    return Ok(Provisioned::AlreadyInstalled);
  }

  info!(target, "adding compilation target");
  run_tool(rustup, &["target", "add", target], cwd).await?.check()?;

  Ok(Provisioned::Installed)
}

fn is_listed(installed: &str, target: &str) -> bool {
  installed.lines().any(|line| line.trim() == target)
}
