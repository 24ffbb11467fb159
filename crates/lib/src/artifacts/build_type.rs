//! Build type detection from the generator cache.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::BUILD_TYPE_KEY;

/// Coarse build flavour used by run and debug tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
  #[default]
  Unknown,
  Debug,
  Profile,
  Release,
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Unknown => "Unknown",
      Self::Debug => "Debug",
      Self::Profile => "Profile",
      Self::Release => "Release",
    };
    f.write_str(name)
  }
}

/// Build types the generator itself knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorBuildType {
  None,
  Debug,
  Release,
  RelWithDebInfo,
  MinSizeRel,
}

impl GeneratorBuildType {
  /// Every variant, in the order build variants are offered.
  pub const ALL: [GeneratorBuildType; 5] = [
    Self::None,
    Self::Debug,
    Self::Release,
    Self::MinSizeRel,
    Self::RelWithDebInfo,
  ];

  /// Case-insensitive parse of the generator's spelling. Never fails.
  pub fn from_raw(raw: &str) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "debug" => Self::Debug,
      "release" => Self::Release,
      "relwithdebinfo" => Self::RelWithDebInfo,
      "minsizerel" => Self::MinSizeRel,
      _ => Self::None,
    }
  }

  /// Value written to the build type key.
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::None => "Build",
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
    }
  }

  pub fn display_name(&self) -> &'static str {
    match self {
      Self::None => "Build",
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "Release with Debug Information",
      Self::MinSizeRel => "Minimum Size Release",
    }
  }

  pub fn build_type(&self) -> BuildType {
    match self {
      Self::Debug => BuildType::Debug,
      Self::Release | Self::MinSizeRel => BuildType::Release,
      Self::RelWithDebInfo => BuildType::Profile,
      Self::None => BuildType::Unknown,
    }
  }
}

/// Map a raw build type string to a [`BuildType`].
pub fn build_type_from_raw(raw: &str) -> BuildType {
  GeneratorBuildType::from_raw(raw).build_type()
}

/// Raw build type value recorded in cache file `content`, if any.
///
/// Only the first line starting with the build type key is considered.
pub fn raw_build_type(content: &str) -> Option<&str> {
  let line = content.lines().find(|line| line.starts_with(BUILD_TYPE_KEY))?;
  line.split_once('=').map(|(_, value)| value.trim())
}

/// Build type of the tree in `build_dir`, read from its cache file.
///
/// A missing or unreadable cache yields [`BuildType::Unknown`].
pub fn detect_build_type(build_dir: &Path, cache_file_name: &str) -> BuildType {
  let cache = build_dir.join(cache_file_name);
  let content = match fs::read(&cache) {
    Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    Err(e) => {
      debug!(cache = %cache.display(), error = %e, "no generator cache");
      return BuildType::Unknown;
    }
  };

  raw_build_type(&content).map(build_type_from_raw).unwrap_or_default()
}
