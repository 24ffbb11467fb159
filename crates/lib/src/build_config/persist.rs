//! On-disk form of a build configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigItem, ConfigItemError, ConfigSet};

#[derive(Debug, Error)]
pub enum PersistError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid state file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to serialize state: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Serialized build configuration. Items are kept in their encoded form so a
/// single bad entry never invalidates the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBuildConfiguration {
  pub display_name: String,
  pub build_directory: PathBuf,
  #[serde(default)]
  pub configuration: Vec<String>,
}

impl PersistedBuildConfiguration {
  pub fn load(path: &Path) -> Result<Self, PersistError> {
    let content = fs::read_to_string(path).map_err(|source| PersistError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| PersistError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Write to `path`, creating parent directories as needed.
  pub fn save(&self, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|source| PersistError::Write {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    let json = serde_json::to_string_pretty(self).map_err(PersistError::Serialize)?;
    fs::write(path, json).map_err(|source| PersistError::Write {
      path: path.to_path_buf(),
      source,
    })?;

    debug!(path = %path.display(), items = self.configuration.len(), "saved build configuration");
    Ok(())
  }
}

/// Decode persisted items, skipping entries that do not decode to a keyed item.
///
/// Returns the decoded set and the number of skipped entries.
pub fn decode_configuration(encoded: &[String]) -> (ConfigSet, usize) {
  let mut dropped = 0;
  let mut items = Vec::with_capacity(encoded.len());

  for entry in encoded {
    match ConfigItem::parse(entry) {
      Ok(item) => items.push(item),
      Err(ConfigItemError::Empty) => {
        dropped += 1;
        debug!(entry = %entry, "skipping blank persisted entry");
      }
      Err(e) => {
        dropped += 1;
        warn!(error = %e, "dropping malformed persisted configuration item");
      }
    }
  }

  (items.into(), dropped)
}
