use std::path::PathBuf;

use crate::consts::{APP_NAME, SETTINGS_FILENAME};

/// Returns the user's home directory, or an empty path when unknown
pub fn home_dir() -> PathBuf {
  let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
  std::env::var_os(var).map(PathBuf::from).unwrap_or_default()
}

/// Per-user configuration directory for reconf.
///
/// `%APPDATA%\reconf` on Windows, `$XDG_CONFIG_HOME/reconf` (falling back to
/// `~/.config/reconf`) elsewhere.
pub fn config_dir() -> PathBuf {
  let base = if cfg!(windows) {
    std::env::var_os("APPDATA").map(PathBuf::from)
  } else {
    std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from)
  };
  base
    .filter(|dir| !dir.as_os_str().is_empty())
    .unwrap_or_else(|| home_dir().join(".config"))
    .join(APP_NAME)
}

/// Location of the user settings file.
pub fn settings_file() -> PathBuf {
  config_dir().join(SETTINGS_FILENAME)
}
