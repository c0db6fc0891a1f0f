//! Host application directories.
//!
//! The installer drops extensions into the host editor's
//! `extensions/installed` directory, whose base follows each platform's
//! conventions for per-user application data.

use std::path::PathBuf;

use super::Os;

/// Returns the host's directory of installed extensions for the current
/// platform, or `None` when the environment doesn't name a home directory.
pub fn host_extensions_dir() -> Option<PathBuf> {
  let os = Os::current()?;
  host_extensions_dir_for(os, |name| std::env::var(name).ok())
}

/// Resolve the host's installed-extensions directory for `os`, reading
/// environment variables through `var`.
///
/// Empty variables count as unset.
pub fn host_extensions_dir_for(os: Os, var: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
  let lookup = |name: &str| var(name).filter(|v| !v.is_empty()).map(PathBuf::from);

  let base = match os {
    Os::Linux => lookup("XDG_DATA_HOME")
      .or_else(|| lookup("HOME").map(|home| home.join(".local").join("share")))?
      .join("zed"),
    Os::MacOs => lookup("HOME")?
      .join("Library")
      .join("Application Support")
      .join("Zed"),
    Os::Windows => lookup("LOCALAPPDATA")?.join("Zed"),
  };

  Some(base.join("extensions").join("installed"))
}
