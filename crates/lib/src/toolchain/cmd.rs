//! External tool invocation.
//!
//! Every stage that talks to the toolchain goes through [`run_tool`], which
//! spawns the program with inherited environment, waits for it, and captures
//! both output streams for diagnostics.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::Path;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
  /// The command line as it would be typed, for messages.
  pub command: String,
  /// Exit code, `None` if the process was killed by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl ToolOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Convert a non-zero exit into a [`ToolFailure`].
  pub fn check(self) -> Result<ToolOutput, ToolFailure> {
    if self.success() {
      Ok(self)
    } else {
      Err(ToolFailure {
        command: self.command,
        code: self.code,
        stderr: self.stderr,
      })
    }
  }
}

/// An external tool ran but exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{command}` {}", describe_exit(.code.as_ref()))]
pub struct ToolFailure {
  pub command: String,
  pub code: Option<i32>,
  pub stderr: String,
}

fn describe_exit(code: Option<&i32>) -> String {
  match code {
    Some(code) => format!("exited with code {}", code),
    None => "was terminated by a signal".to_string(),
  }
}

/// An external tool could not be started at all.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("`{program}` not found; is it installed and on PATH?")]
  NotFound { program: String },

  #[error("failed to run `{program}`: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
}

/// Run `program` with `args` in `cwd` and capture its output.
///
/// A non-zero exit is not an error here; callers decide with
/// [`ToolOutput::check`].
pub async fn run_tool<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: &Path) -> Result<ToolOutput, RunError> {
  let command_line = render_command(program, args);
  debug!(command = %command_line, cwd = %cwd.display(), "spawning process");

  let output = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .output()
    .await
    .map_err(|source| match source.kind() {
      io::ErrorKind::NotFound => RunError::NotFound {
        program: program.to_string(),
      },
      _ => RunError::Spawn {
        program: program.to_string(),
        source,
      },
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
  let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

  if !stdout.is_empty() {
    debug!(stdout = %stdout.trim_end(), "command stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr.trim_end(), "command stderr");
  }

  Ok(ToolOutput {
    command: command_line,
    code: output.status.code(),
    stdout,
    stderr,
  })
}

/// Arguments are passed to the process untouched; only this rendering for
/// messages is lossy.
fn render_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
  std::iter::once(Cow::Borrowed(program))
    .chain(args.iter().map(|arg| arg.as_ref().to_string_lossy()))
    .collect::<Vec<_>>()
    .join(" ")
}
