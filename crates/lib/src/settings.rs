//! User-level settings.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `settings.json` in the configuration directory (see [`settings_file`])
//! 3. `RECONF_*` environment variables

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  DEFAULT_BUILD_DIR_TEMPLATE, DEFAULT_CACHE_FILENAME, DEFAULT_DEPLOYMENT_FILENAME, ENV_BUILD_DIR_TEMPLATE,
  ENV_CACHE_FILE, ENV_DEPLOYMENT_FILE,
};
use crate::platform::paths::settings_file;

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("failed to read settings {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse settings {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Template for shadow build directories, relative to the project directory.
  pub build_directory_template: String,
  /// Deployment manifest looked up in the source and build directories.
  pub deployment_file_name: String,
  /// Generator cache file inside the build directory.
  pub cache_file_name: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      build_directory_template: DEFAULT_BUILD_DIR_TEMPLATE.to_string(),
      deployment_file_name: DEFAULT_DEPLOYMENT_FILENAME.to_string(),
      cache_file_name: DEFAULT_CACHE_FILENAME.to_string(),
    }
  }
}

impl Settings {
  /// Load from the default settings file and the environment.
  pub fn load() -> Result<Self, SettingsError> {
    Self::load_from(&settings_file())
  }

  /// Load from `path` (missing file means defaults), then apply environment overrides.
  pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
    let mut settings = match fs::read_to_string(path) {
      Ok(content) => serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
      })?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "no settings file, using defaults");
        Settings::default()
      }
      Err(source) => {
        return Err(SettingsError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    settings.apply_env();
    Ok(settings)
  }

  fn apply_env(&mut self) {
    if let Ok(value) = std::env::var(ENV_BUILD_DIR_TEMPLATE) {
      self.build_directory_template = value;
    }
    if let Ok(value) = std::env::var(ENV_DEPLOYMENT_FILE) {
      self.deployment_file_name = value;
    }
    if let Ok(value) = std::env::var(ENV_CACHE_FILE) {
      self.cache_file_name = value;
    }
  }
}
