mod build;
mod clean;
mod info;
mod install;
mod setup;

use std::future::Future;

use anyhow::{Context, Result};

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use info::cmd_info;
pub use install::cmd_install;
pub use setup::cmd_setup;

/// Drive one pipeline operation to completion on a single-threaded runtime.
///
/// External tools are awaited one after another; there is no timeout, so a
/// hung compiler hangs the command.
fn run_pipeline<T, E>(operation: impl Future<Output = Result<T, E>>) -> Result<T>
where
  E: std::error::Error + Send + Sync + 'static,
{
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  Ok(rt.block_on(operation)?)
}
