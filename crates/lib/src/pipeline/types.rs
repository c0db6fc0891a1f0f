//! Error types for the pipeline stages.
//!
//! Each stage has its own error enum naming exactly what went wrong there;
//! [`PipelineError`] wraps them so a driver call reports which stage stopped
//! the run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::toolchain::{RunError, ToolFailure};

/// The pipeline's stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  Provision,
  Compile,
  Relocate,
  Install,
  Clean,
}

impl Stage {
  pub fn as_str(&self) -> &'static str {
    match self {
      Stage::Provision => "provision",
      Stage::Compile => "compile",
      Stage::Relocate => "relocate",
      Stage::Install => "install",
      Stage::Clean => "clean",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Provisioning the compilation target failed.
#[derive(Debug, Error)]
pub enum ToolchainError {
  /// The toolchain manager could not be started.
  #[error(transparent)]
  Run(#[from] RunError),

  /// Listing or adding targets exited non-zero.
  #[error(transparent)]
  Failed(#[from] ToolFailure),
}

/// The external compiler failed.
#[derive(Debug, Error)]
pub enum CompileError {
  #[error(transparent)]
  Run(#[from] RunError),

  #[error(transparent)]
  Failed(#[from] ToolFailure),
}

/// Copying the compiler output to its stable path failed.
#[derive(Debug, Error)]
pub enum RelocateError {
  /// The compiler reported success but the expected artifact isn't there,
  /// usually a crate name that doesn't match the compiled library name.
  #[error("expected compiled artifact not found at {}", .path.display())]
  MissingSource { path: PathBuf },

  #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to hash {}: {source}", .path.display())]
  Hash {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Installing into the host's extension directory failed. Each variant names
/// the sub-step that failed.
#[derive(Debug, Error)]
pub enum InstallError {
  #[error("failed to create install directory {}: {source}", .path.display())]
  Mkdir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy artifact {} to {}: {source}", .from.display(), .to.display())]
  CopyArtifact {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy manifest {} to {}: {source}", .from.display(), .to.display())]
  CopyManifest {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("{} has no file name", .path.display())]
  NoFileName { path: PathBuf },

  #[error("refusing to copy {} onto itself; the install directory is the project directory", .path.display())]
  SameFile { path: PathBuf },
}

/// Restoring the pristine state failed.
#[derive(Debug, Error)]
pub enum CleanError {
  #[error(transparent)]
  Run(#[from] RunError),

  #[error(transparent)]
  Failed(#[from] ToolFailure),

  #[error("failed to remove {}: {source}", .path.display())]
  RemoveOutput {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A stage failed and the pipeline stopped.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("toolchain provisioning failed: {0}")]
  Toolchain(#[from] ToolchainError),

  #[error("compilation failed: {0}")]
  Compile(#[from] CompileError),

  #[error("artifact relocation failed: {0}")]
  Relocate(#[from] RelocateError),

  #[error("installation failed: {0}")]
  Install(#[from] InstallError),

  #[error("clean failed: {0}")]
  Clean(#[from] CleanError),
}

impl PipelineError {
  /// The stage that stopped the pipeline.
  pub fn stage(&self) -> Stage {
    match self {
      PipelineError::Toolchain(_) => Stage::Provision,
      PipelineError::Compile(_) => Stage::Compile,
      PipelineError::Relocate(_) => Stage::Relocate,
      PipelineError::Install(_) => Stage::Install,
      PipelineError::Clean(_) => Stage::Clean,
    }
  }

  fn tool_failure(&self) -> Option<&ToolFailure> {
    match self {
      PipelineError::Toolchain(ToolchainError::Failed(failure))
      | PipelineError::Compile(CompileError::Failed(failure))
      | PipelineError::Clean(CleanError::Failed(failure)) => Some(failure),
      _ => None,
    }
  }

  /// Captured stderr of the external tool that failed, if any.
  pub fn diagnostic(&self) -> Option<&str> {
    self
      .tool_failure()
      .map(|failure| failure.stderr.trim_end())
      .filter(|stderr| !stderr.is_empty())
  }

  /// Process exit code for this failure: the failing tool's own code when it
  /// has one in `1..=255`, otherwise 1.
  pub fn exit_code(&self) -> u8 {
    self
      .tool_failure()
      .and_then(|failure| failure.code)
      .and_then(|code| u8::try_from(code).ok())
      .filter(|code| *code != 0)
      .unwrap_or(1)
  }
}
