//! Artifact relocation: copy the compiler output to its stable path.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::artifact::{BuildArtifact, OutputArtifact};
use crate::pipeline::types::RelocateError;
use crate::util::hash::{ContentHash, hash_file};

/// The relocated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocated {
  pub path: PathBuf,
  pub bytes: u64,
  pub sha256: ContentHash,
}

/// Copy `source` to `destination`, replacing whatever is there.
///
/// `source` must be an existing regular file; it is left in place so the
/// build cache stays consistent for the next incremental build.
pub async fn relocate(source: &BuildArtifact, destination: &OutputArtifact) -> Result<Relocated, RelocateError> {
  let from = source.path();
  let to = destination.path();

  match tokio::fs::metadata(from).await {
    Ok(meta) if meta.is_file() => {}
    Ok(_) => return Err(RelocateError::MissingSource { path: from.to_path_buf() }),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(RelocateError::MissingSource { path: from.to_path_buf() });
    }
    Err(e) => {
      return Err(RelocateError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
      });
    }
  }

  let bytes = tokio::fs::copy(from, to).await.map_err(|source| RelocateError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })?;

  let sha256 = hash_file(to).map_err(|source| RelocateError::Hash {
    path: to.to_path_buf(),
    source,
  })?;

  info!(from = %from.display(), to = %to.display(), bytes, "relocated artifact");

  Ok(Relocated {
    path: to.to_path_buf(),
    bytes,
    sha256,
  })
}
