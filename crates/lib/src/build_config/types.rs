use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Kind of artifact a build target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
  Executable,
  DynamicLibrary,
  StaticLibrary,
  Utility,
}

impl TargetType {
  /// Executables and shared libraries are the artifacts worth deploying.
  pub fn is_deployable(&self) -> bool {
    matches!(self, Self::Executable | Self::DynamicLibrary)
  }
}

/// One buildable artifact reported by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
  pub title: String,
  pub target_type: TargetType,
  #[serde(default)]
  pub executable: Option<PathBuf>,
  pub source_directory: PathBuf,
  pub working_directory: PathBuf,
}

impl BuildTarget {
  pub fn new(title: &str, target_type: TargetType) -> Self {
    Self {
      title: title.to_string(),
      target_type,
      executable: None,
      source_directory: PathBuf::new(),
      working_directory: PathBuf::new(),
    }
  }

  pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
    self.executable = Some(path.into());
    self
  }

  pub fn with_source_directory(mut self, path: impl Into<PathBuf>) -> Self {
    self.source_directory = path.into();
    self
  }

  pub fn with_working_directory(mut self, path: impl Into<PathBuf>) -> Self {
    self.working_directory = path.into();
    self
  }
}

/// What an edit of the generator configuration requires beyond a reparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
  /// The edit touched ABI selection keys; the existing build tree must be cleaned.
  pub requires_clean: bool,
}
