//! Shared test helpers for CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use extforge_lib::util::testutil::FakeToolchain;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own project, host extensions directory and the
/// library's fake `rustup`/`cargo` scripts.
pub struct TestEnv {
  pub temp: TempDir,
  pub tools: FakeToolchain,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("extension.toml"), "id = \"lx\"\nname = \"LX\"\n").unwrap();

    Self {
      temp,
      tools: FakeToolchain::new(),
    }
  }

  /// Extension project (holds the manifest; receives the output artifact).
  pub fn project_path(&self) -> PathBuf {
    let p = self.temp.path().join("project");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Host extensions directory. Not created up front.
  pub fn extensions_path(&self) -> PathBuf {
    self.temp.path().join("data").join("zed").join("extensions").join("installed")
  }

  pub fn install_path(&self) -> PathBuf {
    self.extensions_path().join("lx")
  }

  pub fn output_path(&self) -> PathBuf {
    self.project_path().join("extension.wasm")
  }

  /// Get a pre-configured Command for the extforge binary.
  ///
  /// Every location comes from `EXTFORGE_*` variables so tests never touch
  /// the real toolchain or the real host directory.
  pub fn extforge_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("extforge");
    cmd.env("EXTFORGE_PROJECT_DIR", self.project_path());
    cmd.env("EXTFORGE_EXTENSIONS_DIR", self.extensions_path());
    cmd.env("EXTFORGE_RUSTUP", self.tools.rustup());
    cmd.env("EXTFORGE_CARGO", self.tools.cargo());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
