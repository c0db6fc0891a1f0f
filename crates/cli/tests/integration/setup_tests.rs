//! Setup command integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn setup_adds_missing_target() {
  let env = TestEnv::new();

  env
    .extforge_cmd()
    .arg("setup")
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed target wasm32-wasip1"));

  assert_eq!(
    env.tools.rustup_calls(),
    vec!["target list --installed", "target add wasm32-wasip1"]
  );
}

#[test]
#[serial]
fn setup_twice_only_lists_the_second_time() {
  let env = TestEnv::new();

  env.extforge_cmd().arg("setup").assert().success();
  env
    .extforge_cmd()
    .arg("setup")
    .assert()
    .success()
    .stdout(predicate::str::contains("already installed"));

  let adds = env.tools.rustup_calls().into_iter().filter(|c| c.starts_with("target add")).count();
  assert_eq!(adds, 1);
  assert!(env.tools.cargo_calls().is_empty());
}

#[test]
#[serial]
fn setup_json_reports_outcome() {
  let env = TestEnv::new();

  env
    .extforge_cmd()
    .args(["-o", "json", "setup"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"provisioned\": \"installed\""));
}
