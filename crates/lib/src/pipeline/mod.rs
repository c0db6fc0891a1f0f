//! The build-and-install pipeline.
//!
//! Stages run strictly in order, each consuming the previous stage's output:
//!
//! ```text
//! provision -> compile -> relocate -> install
//! clean (independent)
//! ```
//!
//! The driver is a plain call chain, so the first failing stage returns
//! before any later stage is reached. Nothing is retried: every failure cause
//! (bad configuration, missing toolchain, compile errors, permissions) is
//! deterministic for unchanged inputs.

pub mod clean;
pub mod compile;
pub mod install;
pub mod provision;
pub mod relocate;
pub mod types;

use serde::Serialize;
use tracing::info;

use crate::artifact::BuildArtifact;
use crate::config::BuildConfig;

pub use clean::Cleaned;
pub use install::Installed;
pub use provision::Provisioned;
pub use relocate::Relocated;
pub use types::{CleanError, CompileError, InstallError, PipelineError, RelocateError, Stage, ToolchainError};

/// Outcome of `setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
  pub target: String,
  pub provisioned: Provisioned,
}

/// Outcome of `build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  pub setup: SetupReport,
  pub build_artifact: BuildArtifact,
  pub output: Relocated,
}

/// Outcome of `install`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
  pub build: BuildReport,
  pub installed: Installed,
}

/// Drives the stages for one configuration.
///
/// Invocations against the same project or install directory must not run
/// concurrently; nothing here guards against that.
#[derive(Debug, Clone)]
pub struct Pipeline {
  config: BuildConfig,
}

impl Pipeline {
  pub fn new(config: BuildConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Provision the compilation target.
  pub async fn setup(&self) -> Result<SetupReport, PipelineError> {
    let provisioned = provision::ensure(&self.config).await?;
    Ok(SetupReport {
      target: self.config.target().to_string(),
      provisioned,
    })
  }

  /// Provision, compile, then relocate the artifact to its stable path.
  pub async fn build(&self) -> Result<BuildReport, PipelineError> {
    let setup = self.setup().await?;
    let build_artifact = compile::compile(&self.config).await?;
    let output = relocate::relocate(&build_artifact, &self.config.output_artifact()).await?;

    info!(output = %output.path.display(), sha256 = %output.sha256, "build complete");
    Ok(BuildReport {
      setup,
      build_artifact,
      output,
    })
  }

  /// Build, then install the artifact and manifest into the host directory.
  pub async fn install(&self) -> Result<InstallReport, PipelineError> {
    let build = self.build().await?;
    let installed = install::install(
      &self.config.output_artifact(),
      &self.config.manifest_path(),
      &self.config.install_target(),
    )
    .await?;

    Ok(InstallReport { build, installed })
  }

  /// Remove the build cache and the output artifact.
  pub async fn clean(&self) -> Result<Cleaned, PipelineError> {
    Ok(clean::clean(&self.config).await?)
  }
}
