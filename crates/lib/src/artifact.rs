//! Typed paths handed from one stage to the next.
//!
//! Each stage accepts only the path type produced by the stage before it, so
//! the relocator can't be handed an install directory and the installer can't
//! be handed the compiler's raw output.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// The compiler's raw output, inside the build cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildArtifact(PathBuf);

/// The relocated artifact at its stable, target-independent path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputArtifact(PathBuf);

/// The host's directory for this one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InstallTarget(PathBuf);

impl BuildArtifact {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self(path.into())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }
}

impl OutputArtifact {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self(path.into())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }
}

impl InstallTarget {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self(path.into())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for BuildArtifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

impl fmt::Display for OutputArtifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

impl fmt::Display for InstallTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}
