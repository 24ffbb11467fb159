use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ConfigItem;
use crate::environment::Environment;
use crate::kit::Kit;

/// How thoroughly the generator should re-derive its state.
///
/// Ordered by strength; a stronger pending request absorbs weaker ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReparseMode {
  /// Refresh targets, reuse the existing configuration.
  Default,
  /// Compare the configuration with the build tree and reconfigure on mismatch.
  CheckConfiguration,
  /// Reconfigure unconditionally.
  ForceConfiguration,
}

impl fmt::Display for ReparseMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Default => "default",
      Self::CheckConfiguration => "check",
      Self::ForceConfiguration => "force",
    };
    f.write_str(name)
  }
}

/// Identifies one parse request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Everything that can make a build configuration reparse, plus the
/// generator's completion reports.
#[derive(Debug, Clone)]
pub enum Event {
  /// A kit changed. Ignored unless it is this configuration's kit.
  KitUpdated(Arc<Kit>),
  /// The configuration became the active one of its target.
  Activated,
  /// Another configuration became active.
  Deactivated,
  EnvironmentChanged(Environment),
  BuildDirectoryChanged(PathBuf),
  /// The user edited configuration items.
  ConfigurationEdited(Vec<ConfigItem>),
  /// A project file changed on disk.
  ProjectFileDirty,
  ParsingSucceeded(RequestToken),
  ParsingFailed { token: RequestToken, message: String },
}

impl Event {
  /// Short name for log output.
  pub fn name(&self) -> &'static str {
    match self {
      Self::KitUpdated(_) => "kit_updated",
      Self::Activated => "activated",
      Self::Deactivated => "deactivated",
      Self::EnvironmentChanged(_) => "environment_changed",
      Self::BuildDirectoryChanged(_) => "build_directory_changed",
      Self::ConfigurationEdited(_) => "configuration_edited",
      Self::ProjectFileDirty => "project_file_dirty",
      Self::ParsingSucceeded(_) => "parsing_succeeded",
      Self::ParsingFailed { .. } => "parsing_failed",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn modes_are_ordered_by_strength() {
    assert!(ReparseMode::Default < ReparseMode::CheckConfiguration);
    assert!(ReparseMode::CheckConfiguration < ReparseMode::ForceConfiguration);
    assert_eq!(
      ReparseMode::CheckConfiguration.max(ReparseMode::ForceConfiguration),
      ReparseMode::ForceConfiguration
    );
  }

  #[test]
  fn tokens_display_with_hash() {
    assert_eq!(RequestToken(7).to_string(), "#7");
  }
}
