//! Install command integration tests.

use predicates::prelude::*;
use serial_test::serial;
use walkdir::WalkDir;

use super::common::TestEnv;

fn installed_files(env: &TestEnv) -> Vec<String> {
  let mut names: Vec<String> = WalkDir::new(env.install_path())
    .min_depth(1)
    .into_iter()
    .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}

#[test]
#[serial]
fn install_builds_then_copies_artifact_and_manifest() {
  let env = TestEnv::new();
  assert!(!env.extensions_path().exists());

  env
    .extforge_cmd()
    .arg("install")
    .assert()
    .success()
    .stdout(predicate::str::contains("Install complete"))
    .stdout(predicate::str::contains("Installed to"));

  assert_eq!(installed_files(&env), vec!["extension.toml", "extension.wasm"]);
  assert_eq!(
    std::fs::read(env.install_path().join("extension.wasm")).unwrap(),
    std::fs::read(env.output_path()).unwrap()
  );
}

#[test]
#[serial]
fn failed_compile_never_creates_install_dir() {
  let env = TestEnv::new();
  env.tools.fail_build("error[E0433]: failed to resolve: use of undeclared crate or module `zed`");

  env
    .extforge_cmd()
    .arg("install")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("error[E0433]"));

  assert!(!env.extensions_path().exists());
}

#[test]
#[serial]
fn install_twice_is_idempotent() {
  let env = TestEnv::new();

  env.extforge_cmd().arg("install").assert().success();
  env.extforge_cmd().arg("install").assert().success();

  assert_eq!(installed_files(&env), vec!["extension.toml", "extension.wasm"]);
}

#[test]
#[serial]
fn missing_manifest_fails_after_artifact_copy() {
  let env = TestEnv::new();
  std::fs::remove_file(env.project_path().join("extension.toml")).unwrap();

  env
    .extforge_cmd()
    .arg("install")
    .assert()
    .failure()
    .stderr(predicate::str::contains("[install]"))
    .stderr(predicate::str::contains("extension.toml"));

  assert_eq!(installed_files(&env), vec!["extension.wasm"]);
}

#[test]
#[serial]
fn install_into_project_directory_is_refused() {
  let env = TestEnv::new();

  env
    .extforge_cmd()
    .env("EXTFORGE_EXTENSIONS_DIR", env.temp.path())
    .args(["--extension-id", "project", "install"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("onto itself"));

  assert_eq!(
    std::fs::read_to_string(env.project_path().join("extension.toml")).unwrap(),
    "id = \"lx\"\nname = \"LX\"\n"
  );
  assert!(std::fs::metadata(env.output_path()).unwrap().len() > 0);
}
