/// Prefix for every environment variable the configuration reads.
pub const ENV_PREFIX: &str = "EXTFORGE";

pub const DEFAULT_TARGET: &str = "wasm32-wasip1";
pub const DEFAULT_CRATE_NAME: &str = "lx-zed";
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "wasm";
pub const DEFAULT_OUTPUT_FILE: &str = "extension.wasm";
pub const DEFAULT_EXTENSION_ID: &str = "lx";
pub const DEFAULT_MANIFEST_FILE: &str = "extension.toml";
pub const DEFAULT_PROJECT_DIR: &str = ".";

pub const DEFAULT_RUSTUP: &str = "rustup";
pub const DEFAULT_CARGO: &str = "cargo";

/// Build cache directory name, relative to the project directory.
pub const BUILD_DIR_NAME: &str = "target";

/// Cargo's output directory for optimized builds.
pub const RELEASE_PROFILE_DIR: &str = "release";
