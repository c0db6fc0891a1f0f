//! CLI smoke tests for extforge.
//!
//! These run the binary without ever reaching the external toolchain: help,
//! version, `info`, and configuration failures.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the extforge binary.
fn extforge_cmd() -> Command {
  cargo_bin_cmd!("extforge")
}

/// A temp project with a manifest, plus explicit directories so nothing
/// depends on the host environment.
fn configured_cmd(temp: &TempDir) -> Command {
  std::fs::write(temp.path().join("extension.toml"), "id = \"lx\"\n").unwrap();
  let mut cmd = extforge_cmd();
  cmd
    .arg("--project-dir")
    .arg(temp.path())
    .arg("--extensions-dir")
    .arg(temp.path().join("installed"));
  cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  extforge_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  extforge_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("extforge"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["setup", "build", "install", "clean", "info"] {
    extforge_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn missing_subcommand_fails() {
  extforge_cmd().assert().failure();
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_shows_resolved_paths() {
  let temp = TempDir::new().unwrap();

  configured_cmd(&temp)
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("Platform"))
    .stdout(predicate::str::contains("wasm32-wasip1"))
    .stdout(predicate::str::contains("lx_zed.wasm"))
    .stdout(predicate::str::contains("extension.wasm"));
}

#[test]
fn info_flags_override_defaults() {
  let temp = TempDir::new().unwrap();

  configured_cmd(&temp)
    .args(["--target", "wasm32-unknown-unknown", "--crate-name", "my-ext", "--extension-id", "mine"])
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("wasm32-unknown-unknown"))
    .stdout(predicate::str::contains("my_ext.wasm"))
    .stdout(predicate::str::contains("mine"));
}

#[test]
fn info_flags_win_over_environment() {
  let temp = TempDir::new().unwrap();

  configured_cmd(&temp)
    .env("EXTFORGE_TARGET", "from-env")
    .args(["--target", "from-flag"])
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("from-flag"))
    .stdout(predicate::str::contains("from-env").not());
}

#[test]
fn info_json_output_is_valid() {
  let temp = TempDir::new().unwrap();

  let output = configured_cmd(&temp).args(["-o", "json", "info"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["config"]["target"], "wasm32-wasip1");
  assert_eq!(json["output_exists"], false);
  assert_eq!(json["installed"], false);
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn invalid_target_exits_with_config_code() {
  let temp = TempDir::new().unwrap();

  configured_cmd(&temp)
    .args(["--target", "not a triple"])
    .arg("build")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("invalid target"));
}

#[test]
fn output_file_with_separator_is_rejected() {
  let temp = TempDir::new().unwrap();

  configured_cmd(&temp)
    .args(["--output-file", "../escape.wasm"])
    .arg("build")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("plain file name"));
}

#[test]
fn missing_project_dir_exits_with_config_code() {
  let temp = TempDir::new().unwrap();

  extforge_cmd()
    .arg("--project-dir")
    .arg(temp.path().join("nope"))
    .arg("--extensions-dir")
    .arg(temp.path().join("installed"))
    .arg("clean")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn output_file_named_like_manifest_is_rejected() {
  let temp = TempDir::new().unwrap();

  configured_cmd(&temp)
    .args(["--output-file", "extension.toml"])
    .arg("install")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("would overwrite the manifest"));

  assert_eq!(
    std::fs::read_to_string(temp.path().join("extension.toml")).unwrap(),
    "id = \"lx\"\n"
  );
}
