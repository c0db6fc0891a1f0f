//! Restore the pristine state: clear the build cache and the output artifact.

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::pipeline::types::CleanError;
use crate::toolchain::run_tool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cleaned {
  pub output: PathBuf,
  /// False when there was no output artifact to remove.
  pub output_removed: bool,
}

/// Run the toolchain's cache clean, then delete the output artifact.
///
/// The install directory is never touched.
pub async fn clean(config: &BuildConfig) -> Result<Cleaned, CleanError> {
  let build_root = config.build_root();

  info!(build_root = %build_root.display(), "cleaning build cache");
  run_tool(
    config.cargo(),
    &[OsStr::new("clean"), OsStr::new("--target-dir"), build_root.as_os_str()],
    config.project_dir(),
  )
  .await?
  .check()?;

  let output = config.output_artifact().path().to_path_buf();
  let output_removed = match tokio::fs::remove_file(&output).await {
    Ok(()) => true,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %output.display(), "no output artifact to remove");
      false
    }
    Err(source) => return Err(CleanError::RemoveOutput { path: output, source }),
  };

  Ok(Cleaned { output, output_removed })
}
