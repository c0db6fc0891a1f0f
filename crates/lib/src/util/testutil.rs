//! Test utilities for extforge-lib.
//!
//! [`FakeToolchain`] writes stand-in `rustup` and `cargo` shell scripts that
//! mimic the parts of the real tools the pipeline relies on and log every
//! invocation. Failure modes are switched on by dropping control files next
//! to the scripts, so the scripts themselves are written exactly once.
//!
//! Compiled for this crate's tests and, behind the `testutil` feature, for
//! the CLI's integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{BuildConfig, ConfigOverrides};

const FAKE_RUSTUP: &str = r#"#!/bin/sh
here=$(dirname "$0")
echo "$*" >> "$here/rustup.log"
touch "$here/installed-targets"
if [ "$1 $2 $3" = "target list --installed" ]; then
  cat "$here/installed-targets"
  exit 0
fi
if [ "$1 $2" = "target add" ]; then
  if [ -f "$here/add-fail" ]; then
    cat "$here/add-fail" >&2
    exit 1
  fi
  grep -qx "$3" "$here/installed-targets" || echo "$3" >> "$here/installed-targets"
  exit 0
fi
echo "error: unexpected arguments: $*" >&2
exit 2
"#;

const FAKE_CARGO: &str = r#"#!/bin/sh
here=$(dirname "$0")
echo "$*" >> "$here/cargo.log"
cmd=$1
shift
target=""
target_dir=""
while [ $# -gt 0 ]; do
  case "$1" in
    --target) target=$2; shift ;;
    --target-dir) target_dir=$2; shift ;;
  esac
  shift
done
case "$cmd" in
  build)
    if [ -f "$here/build-fail" ]; then
      cat "$here/build-fail" >&2
      exit $(cat "$here/build-code" 2>/dev/null || echo 1)
    fi
    stem=$(cat "$here/stem")
    mkdir -p "$target_dir/$target/release"
    printf 'fake module for %s\n' "$target" > "$target_dir/$target/release/$stem.wasm"
    ;;
  clean)
    if [ -f "$here/clean-fail" ]; then
      cat "$here/clean-fail" >&2
      exit 1
    fi
    rm -rf "$target_dir"
    ;;
  *)
    echo "error: unexpected arguments: $cmd" >&2
    exit 2
    ;;
esac
"#;

/// Contents the fake compiler writes for `target`.
pub fn fake_module(target: &str) -> String {
  format!("fake module for {}\n", target)
}

pub struct FakeToolchain {
  dir: TempDir,
}

impl FakeToolchain {
  /// Fake tools that succeed and produce `lx_zed.wasm`.
  pub fn new() -> Self {
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("rustup"), FAKE_RUSTUP);
    write_script(&dir.path().join("cargo"), FAKE_CARGO);
    fs::write(dir.path().join("stem"), "lx_zed").unwrap();
    Self { dir }
  }

  pub fn rustup(&self) -> PathBuf {
    self.dir.path().join("rustup")
  }

  pub fn cargo(&self) -> PathBuf {
    self.dir.path().join("cargo")
  }

  /// Make `cargo build` print `stderr` and exit 1.
  pub fn fail_build(&self, stderr: &str) {
    fs::write(self.dir.path().join("build-fail"), stderr).unwrap();
  }

  /// Make `cargo build` print `stderr` and exit with `code`.
  pub fn fail_build_with_code(&self, stderr: &str, code: i32) {
    self.fail_build(stderr);
    fs::write(self.dir.path().join("build-code"), code.to_string()).unwrap();
  }

  /// Make `cargo build` name its output `<stem>.wasm`.
  pub fn produce_stem(&self, stem: &str) {
    fs::write(self.dir.path().join("stem"), stem).unwrap();
  }

  /// Make `rustup target add` print `stderr` and exit 1.
  pub fn fail_target_add(&self, stderr: &str) {
    fs::write(self.dir.path().join("add-fail"), stderr).unwrap();
  }

  /// Make `cargo clean` print `stderr` and exit 1.
  pub fn fail_clean(&self, stderr: &str) {
    fs::write(self.dir.path().join("clean-fail"), stderr).unwrap();
  }

  /// Mark `target` as already installed.
  pub fn preinstall(&self, target: &str) {
    fs::write(self.dir.path().join("installed-targets"), format!("{}\n", target)).unwrap();
  }

  pub fn installed_targets(&self) -> Vec<String> {
    read_lines(&self.dir.path().join("installed-targets"))
  }

  /// Argument lines of every `rustup` invocation so far.
  pub fn rustup_calls(&self) -> Vec<String> {
    read_lines(&self.dir.path().join("rustup.log"))
  }

  /// Argument lines of every `cargo` invocation so far.
  pub fn cargo_calls(&self) -> Vec<String> {
    read_lines(&self.dir.path().join("cargo.log"))
  }
}

/// A throwaway project directory with a manifest and a not-yet-existing,
/// multi-level host extensions directory.
pub struct TestProject {
  temp: TempDir,
}

impl TestProject {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("project")).unwrap();
    fs::write(
      temp.path().join("project").join("extension.toml"),
      "id = \"lx\"\nname = \"LX\"\n",
    )
    .unwrap();
    Self { temp }
  }

  pub fn project_dir(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn extensions_dir(&self) -> PathBuf {
    self.temp.path().join("home").join("zed").join("extensions").join("installed")
  }

  /// Resolve a configuration wired to `tools`.
  pub fn config(&self, tools: &FakeToolchain) -> BuildConfig {
    self.config_with(tools, ConfigOverrides::default())
  }

  pub fn config_with(&self, tools: &FakeToolchain, overrides: ConfigOverrides) -> BuildConfig {
    BuildConfig::resolve(overrides.or(ConfigOverrides {
      project_dir: Some(self.project_dir()),
      extensions_dir: Some(self.extensions_dir()),
      rustup: Some(tools.rustup().to_string_lossy().into_owned()),
      cargo: Some(tools.cargo().to_string_lossy().into_owned()),
      ..Default::default()
    }))
    .unwrap()
  }
}

fn write_script(path: &Path, body: &str) {
  fs::write(path, body).unwrap();
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
  match fs::read_to_string(path) {
    Ok(content) => content.lines().map(str::to_string).collect(),
    Err(_) => Vec::new(),
  }
}
