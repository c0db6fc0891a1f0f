//! Installation into the host application's extension directory.
//!
//! The artifact is copied before the manifest and there is no rollback: if
//! the manifest copy fails, the artifact stays installed without it. Running
//! install again repairs that, since every step overwrites.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::artifact::{InstallTarget, OutputArtifact};
use crate::pipeline::types::InstallError;

/// Files placed in the install directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installed {
  pub dir: PathBuf,
  pub artifact: PathBuf,
  pub manifest: PathBuf,
}

/// Copy `artifact` and `manifest` into `target_dir`, creating it (and any
/// missing parents) first.
pub async fn install(
  artifact: &OutputArtifact,
  manifest: &Path,
  target_dir: &InstallTarget,
) -> Result<Installed, InstallError> {
  let dir = target_dir.path();

  tokio::fs::create_dir_all(dir)
    .await
    .map_err(|source| InstallError::Mkdir {
      path: dir.to_path_buf(),
      source,
    })?;

  let artifact_dest = dir.join(file_name(artifact.path())?);
  ensure_distinct(artifact.path(), &artifact_dest).await?;
  tokio::fs::copy(artifact.path(), &artifact_dest)
    .await
    .map_err(|source| InstallError::CopyArtifact {
      from: artifact.path().to_path_buf(),
      to: artifact_dest.clone(),
      source,
    })?;

  let manifest_dest = dir.join(file_name(manifest)?);
  ensure_distinct(manifest, &manifest_dest).await?;
  tokio::fs::copy(manifest, &manifest_dest)
    .await
    .map_err(|source| InstallError::CopyManifest {
      from: manifest.to_path_buf(),
      to: manifest_dest.clone(),
      source,
    })?;

  info!(dir = %dir.display(), "installed extension");

  Ok(Installed {
    dir: dir.to_path_buf(),
    artifact: artifact_dest,
    manifest: manifest_dest,
  })
}

/// Copying a file onto itself truncates it, so an install directory that is
/// the project directory must be refused before any copy.
async fn ensure_distinct(from: &Path, to: &Path) -> Result<(), InstallError> {
  let (Ok(from), Ok(to)) = (tokio::fs::canonicalize(from).await, tokio::fs::canonicalize(to).await) else {
    return Ok(());
  };
  if from == to {
    return Err(InstallError::SameFile { path: from });
  }
  Ok(())
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, InstallError> {
  path.file_name().ok_or_else(|| InstallError::NoFileName {
    path: path.to_path_buf(),
  })
}
