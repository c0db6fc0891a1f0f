//! Build command integration tests.

use predicates::prelude::*;
use extforge_lib::util::testutil::fake_module;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn build_relocates_artifact_to_output_path() {
  let env = TestEnv::new();

  env
    .extforge_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"))
    .stdout(predicate::str::contains("SHA-256"));

  assert_eq!(
    std::fs::read_to_string(env.output_path()).unwrap(),
    fake_module("wasm32-wasip1")
  );
  assert!(env.tools.cargo_calls()[0].starts_with("build --release --target wasm32-wasip1 --target-dir "));
  assert!(!env.install_path().exists(), "build never installs");
}

#[test]
#[serial]
fn build_failure_propagates_compiler_exit_code_and_diagnostic() {
  let env = TestEnv::new();
  env.tools.fail_build_with_code("error[E0425]: cannot find value `x` in this scope", 101);

  env
    .extforge_cmd()
    .arg("build")
    .assert()
    .code(101)
    .stderr(predicate::str::contains("error[E0425]: cannot find value `x` in this scope"))
    .stderr(predicate::str::contains("[compile]"));

  assert!(!env.output_path().exists());
}

#[test]
#[serial]
fn crate_name_mismatch_names_expected_path() {
  let env = TestEnv::new();

  env
    .extforge_cmd()
    .args(["--crate-name", "other-name", "build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("[relocate]"))
    .stderr(predicate::str::contains("other_name.wasm"));
}

#[test]
#[serial]
fn build_json_output_is_valid() {
  let env = TestEnv::new();

  let output = env.extforge_cmd().args(["-o", "json", "build"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["setup"]["target"], "wasm32-wasip1");
  assert_eq!(json["output"]["bytes"], fake_module("wasm32-wasip1").len());
  assert_eq!(json["output"]["sha256"].as_str().unwrap().len(), 64);
}
