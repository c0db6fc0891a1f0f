//! extforge-lib: build and install pipeline for compiled extension modules
//!
//! This crate provides the pieces the `extforge` CLI is assembled from:
//! - `BuildConfig`: the validated, read-only configuration for one invocation
//! - `artifact`: typed paths for each artifact a stage produces or consumes
//! - `toolchain`: running the external toolchain manager and compiler
//! - `pipeline`: the provision, compile, relocate, install and clean stages and
//!   the driver that sequences them

pub mod artifact;
pub mod config;
pub mod consts;
pub mod pipeline;
pub mod platform;
pub mod toolchain;
pub mod util;

pub use config::{BuildConfig, ConfigError, ConfigOverrides};
pub use pipeline::{Pipeline, PipelineError, Stage};
