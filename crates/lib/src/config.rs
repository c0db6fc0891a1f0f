//! Configuration for one pipeline invocation.
//!
//! A [`BuildConfig`] is resolved exactly once, from built-in defaults, then
//! `EXTFORGE_*` environment variables, then explicit overrides (command-line
//! flags), and is read-only afterwards. Every stage receives it rather than
//! reaching for literals of its own.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::artifact::{BuildArtifact, InstallTarget, OutputArtifact};
use crate::consts::{
  BUILD_DIR_NAME, DEFAULT_ARTIFACT_EXTENSION, DEFAULT_CARGO, DEFAULT_CRATE_NAME, DEFAULT_EXTENSION_ID,
  DEFAULT_MANIFEST_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PROJECT_DIR, DEFAULT_RUSTUP, DEFAULT_TARGET, ENV_PREFIX,
  RELEASE_PROFILE_DIR,
};
use crate::platform::paths::host_extensions_dir;

/// Errors raised while resolving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{field} must not be empty")]
  Empty { field: &'static str },

  #[error("invalid {field} `{value}`: {reason}")]
  Invalid {
    field: &'static str,
    value: String,
    reason: &'static str,
  },

  #[error("project directory {} does not exist or is not a directory", .path.display())]
  MissingProjectDir { path: PathBuf },

  #[error("failed to determine the current directory")]
  CurrentDir(#[source] std::io::Error),

  #[error("output file and manifest file are both `{name}`; the build would overwrite the manifest")]
  OutputIsManifest { name: String },

  #[error("could not determine the host extensions directory; set EXTFORGE_EXTENSIONS_DIR or pass --extensions-dir")]
  NoHostDir,
}

/// Optional values layered over the defaults.
///
/// Unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
  pub project_dir: Option<PathBuf>,
  pub target: Option<String>,
  pub crate_name: Option<String>,
  pub artifact_extension: Option<String>,
  pub output_file: Option<String>,
  pub extension_id: Option<String>,
  pub manifest_file: Option<String>,
  pub extensions_dir: Option<PathBuf>,
  pub cargo: Option<String>,
  pub rustup: Option<String>,
}

impl ConfigOverrides {
  /// Read `EXTFORGE_*` variables from the process environment.
  pub fn from_env() -> Self {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Read `EXTFORGE_*` variables through `var`. Blank values count as unset.
  pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
    let get = |suffix: &str| var(format!("{ENV_PREFIX}_{suffix}").as_str()).filter(|v| !v.trim().is_empty());

    Self {
      project_dir: get("PROJECT_DIR").map(PathBuf::from),
      target: get("TARGET"),
      crate_name: get("CRATE_NAME"),
      artifact_extension: get("ARTIFACT_EXTENSION"),
      output_file: get("OUTPUT_FILE"),
      extension_id: get("EXTENSION_ID"),
      manifest_file: get("MANIFEST"),
      extensions_dir: get("EXTENSIONS_DIR").map(PathBuf::from),
      cargo: get("CARGO"),
      rustup: get("RUSTUP"),
    }
  }

  /// Fill every field left unset in `self` from `fallback`.
  pub fn or(self, fallback: Self) -> Self {
    Self {
      project_dir: self.project_dir.or(fallback.project_dir),
      target: self.target.or(fallback.target),
      crate_name: self.crate_name.or(fallback.crate_name),
      artifact_extension: self.artifact_extension.or(fallback.artifact_extension),
      output_file: self.output_file.or(fallback.output_file),
      extension_id: self.extension_id.or(fallback.extension_id),
      manifest_file: self.manifest_file.or(fallback.manifest_file),
      extensions_dir: self.extensions_dir.or(fallback.extensions_dir),
      cargo: self.cargo.or(fallback.cargo),
      rustup: self.rustup.or(fallback.rustup),
    }
  }
}

/// Resolved, validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  target: String,
  crate_name: String,
  artifact_extension: String,
  output_file: String,
  extension_id: String,
  manifest_file: String,
  project_dir: PathBuf,
  build_root: PathBuf,
  extensions_dir: PathBuf,
  cargo: String,
  rustup: String,
}

impl BuildConfig {
  /// Apply `overrides` over the built-in defaults and validate the result.
  ///
  /// Relative directories are made absolute against the current directory.
  /// The host extensions directory is only looked up when not overridden.
  pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
    let project_dir = overrides
      .project_dir
      .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_DIR));
    let project_dir = absolutize(project_dir)?;
    if !project_dir.is_dir() {
      return Err(ConfigError::MissingProjectDir { path: project_dir });
    }
    let project_dir = dunce::canonicalize(&project_dir).unwrap_or(project_dir);

    let extensions_dir = match overrides.extensions_dir {
      Some(dir) => absolutize(dir)?,
      None => host_extensions_dir().ok_or(ConfigError::NoHostDir)?,
    };

    let config = Self {
      target: overrides.target.unwrap_or_else(|| DEFAULT_TARGET.to_string()),
      crate_name: overrides.crate_name.unwrap_or_else(|| DEFAULT_CRATE_NAME.to_string()),
      artifact_extension: overrides
        .artifact_extension
        .unwrap_or_else(|| DEFAULT_ARTIFACT_EXTENSION.to_string()),
      output_file: overrides.output_file.unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
      extension_id: overrides.extension_id.unwrap_or_else(|| DEFAULT_EXTENSION_ID.to_string()),
      manifest_file: overrides.manifest_file.unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string()),
      build_root: project_dir.join(BUILD_DIR_NAME),
      project_dir,
      extensions_dir,
      cargo: overrides.cargo.unwrap_or_else(|| DEFAULT_CARGO.to_string()),
      rustup: overrides.rustup.unwrap_or_else(|| DEFAULT_RUSTUP.to_string()),
    };

    config.validate()?;
    debug!(?config, "resolved configuration");
    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    check_identifier("target", &self.target, |c| {
      c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
    })?;
    check_identifier("crate name", &self.crate_name, |c| {
      c.is_ascii_alphanumeric() || matches!(c, '_' | '-')
    })?;
    check_identifier("artifact extension", &self.artifact_extension, |c| {
      c.is_ascii_alphanumeric()
    })?;
    check_identifier("extension id", &self.extension_id, |c| {
      c.is_ascii_alphanumeric() || matches!(c, '_' | '-')
    })?;
    check_file_name("output file", &self.output_file)?;
    check_file_name("manifest file", &self.manifest_file)?;
    if self.output_file == self.manifest_file {
      return Err(ConfigError::OutputIsManifest {
        name: self.output_file.clone(),
      });
    }
    check_non_empty("cargo program", &self.cargo)?;
    check_non_empty("rustup program", &self.rustup)?;
    Ok(())
  }

  /// Cross-compilation target, e.g. `wasm32-wasip1`.
  pub fn target(&self) -> &str {
    &self.target
  }

  pub fn crate_name(&self) -> &str {
    &self.crate_name
  }

  pub fn artifact_extension(&self) -> &str {
    &self.artifact_extension
  }

  pub fn output_file(&self) -> &str {
    &self.output_file
  }

  pub fn extension_id(&self) -> &str {
    &self.extension_id
  }

  pub fn manifest_file(&self) -> &str {
    &self.manifest_file
  }

  pub fn project_dir(&self) -> &Path {
    &self.project_dir
  }

  /// The build cache, passed to cargo as `--target-dir`.
  pub fn build_root(&self) -> &Path {
    &self.build_root
  }

  pub fn extensions_dir(&self) -> &Path {
    &self.extensions_dir
  }

  pub fn cargo(&self) -> &str {
    &self.cargo
  }

  pub fn rustup(&self) -> &str {
    &self.rustup
  }

  /// File stem cargo gives the compiled library: hyphens become underscores.
  pub fn artifact_stem(&self) -> String {
    self.crate_name.replace('-', "_")
  }

  /// `<build-root>/<target>/release/<artifact-stem>.<artifact-extension>`
  pub fn build_artifact(&self) -> BuildArtifact {
    BuildArtifact::new(
      self
        .build_root
        .join(&self.target)
        .join(RELEASE_PROFILE_DIR)
        .join(format!("{}.{}", self.artifact_stem(), self.artifact_extension)),
    )
  }

  /// `<project-dir>/<output-file>`
  pub fn output_artifact(&self) -> OutputArtifact {
    OutputArtifact::new(self.project_dir.join(&self.output_file))
  }

  /// `<project-dir>/<manifest-file>`
  pub fn manifest_path(&self) -> PathBuf {
    self.project_dir.join(&self.manifest_file)
  }

  /// `<extensions-dir>/<extension-id>`
  pub fn install_target(&self) -> InstallTarget {
    InstallTarget::new(self.extensions_dir.join(&self.extension_id))
  }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, ConfigError> {
  if path.is_absolute() {
    return Ok(path);
  }
  let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
  Ok(cwd.join(path))
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
  if value.trim().is_empty() {
    return Err(ConfigError::Empty { field });
  }
  Ok(())
}

fn check_identifier(field: &'static str, value: &str, allowed: impl Fn(char) -> bool) -> Result<(), ConfigError> {
  check_non_empty(field, value)?;
  if !value.chars().all(allowed) {
    return Err(ConfigError::Invalid {
      field,
      value: value.to_string(),
      reason: "contains characters outside the allowed set",
    });
  }
  Ok(())
}

fn check_file_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
  check_non_empty(field, value)?;
  let plain = !value.contains(['/', '\\']) && Path::new(value).file_name() == Some(OsStr::new(value));
  if !plain {
    return Err(ConfigError::Invalid {
      field,
      value: value.to_string(),
      reason: "must be a plain file name",
    });
  }
  Ok(())
}
