//! Seams to the collaborators of the coordinator: the generator backend
//! and the project that owns the build configuration.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use super::event::{ReparseMode, RequestToken};
use crate::build_config::{BuildConfiguration, BuildTarget};
use crate::config::ConfigSet;
use crate::environment::Environment;
use crate::kit::Kit;

#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("generator rejected the parse request: {0}")]
  Rejected(String),

  #[error("failed to read generator results: {0}")]
  Results(String),

  #[error("failed to generate project tree: {0}")]
  ProjectTree(String),

  #[error(transparent)]
  Io(#[from] io::Error),
}

/// Inputs of one parse.
#[derive(Debug, Clone)]
pub struct ParseParameters {
  pub source_directory: PathBuf,
  pub build_directory: PathBuf,
  pub kit: Arc<Kit>,
  pub environment: Environment,
  /// Kit configuration overlaid with the stored configuration.
  pub configuration: ConfigSet,
}

/// A node of the project tree shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectNode {
  pub path: PathBuf,
  pub display_name: String,
  pub files: Vec<PathBuf>,
  pub children: Vec<ProjectNode>,
}

impl ProjectNode {
  /// Number of files in this node and all nodes below it.
  pub fn file_count(&self) -> usize {
    self.files.len() + self.children.iter().map(ProjectNode::file_count).sum::<usize>()
  }
}

/// The external build-system backend.
///
/// A parse runs out of band: `request_parse` only starts it, and the outcome
/// arrives later as [`Event::ParsingSucceeded`](super::Event::ParsingSucceeded)
/// or [`Event::ParsingFailed`](super::Event::ParsingFailed) carrying the same
/// token.
pub trait Generator: Send {
  /// Start a parse. `Ok` means the generator accepted it.
  fn request_parse(
    &mut self,
    params: ParseParameters,
    mode: ReparseMode,
    token: RequestToken,
  ) -> Result<(), GeneratorError>;

  /// Abandon any running parse and drop intermediate results.
  fn stop_parsing_and_clear_state(&mut self);

  /// Build targets of the last finished parse.
  fn take_build_targets(&mut self) -> Result<Vec<BuildTarget>, GeneratorError>;

  /// Configuration the generator ended up using in the last finished parse.
  fn take_configuration(&mut self) -> Result<ConfigSet, GeneratorError>;

  fn generate_project_tree(&mut self, known_files: &[PathBuf]) -> Result<ProjectNode, GeneratorError>;
}

/// The project owning a build configuration.
///
/// Held by the coordinator as a `Weak` reference; notifications are skipped
/// once the project is gone.
pub trait ProjectBuildSystem: Send + Sync {
  fn parsing_succeeded(&self, config: &BuildConfiguration);

  fn parsing_failed(&self, config: &BuildConfiguration);

  /// Whether the configuration can be built may have changed.
  fn enabled_changed(&self, _config: &BuildConfiguration) {}

  /// An edit invalidated the build tree; it should be cleaned before the next build.
  fn clean_requested(&self, _config: &BuildConfiguration) {}
}
