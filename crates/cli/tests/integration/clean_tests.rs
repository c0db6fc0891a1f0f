//! Clean command integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn clean_before_any_build_succeeds() {
  let env = TestEnv::new();

  env
    .extforge_cmd()
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Output removed: no"));
}

#[test]
#[serial]
fn clean_removes_output_but_keeps_install() {
  let env = TestEnv::new();
  env.extforge_cmd().arg("install").assert().success();

  env
    .extforge_cmd()
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Output removed: yes"));

  assert!(!env.output_path().exists());
  assert!(!env.project_path().join("target").exists());
  assert!(env.install_path().join("extension.wasm").exists());
}
