use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::android;
use super::persist::{PersistedBuildConfiguration, decode_configuration};
use super::types::{BuildTarget, EditOutcome};
use super::variants::{BuildInfo, shadow_build_directory};
use crate::artifacts::{BuildType, DerivedArtifacts, detect_build_type};
use crate::config::{ConfigItem, ConfigSet, overridden_keys, override_detected};
use crate::consts::ANDROID_BUILD_ABI_PREFIX;
use crate::environment::Environment;
use crate::kit::Kit;
use crate::reparse::ParseParameters;
use crate::settings::Settings;

/// Warning shown while the stored configuration contradicts the kit.
pub const KIT_OVERRIDE_WARNING: &str = "CMake configuration set by the kit was overridden in the project.";

/// Persistent state of one (project, kit, variant) combination.
///
/// The configuration handed to the generator is always the kit configuration
/// overlaid with the stored configuration (see
/// [`configuration_for_generator`](Self::configuration_for_generator)).
#[derive(Debug, Clone)]
pub struct BuildConfiguration {
  display_name: String,
  kit: Arc<Kit>,
  project_file: PathBuf,
  source_directory: PathBuf,
  build_directory: PathBuf,
  environment: Environment,
  settings: Arc<Settings>,
  initial_configuration: ConfigSet,
  configuration_for_generator: ConfigSet,
  configuration_from_generator: ConfigSet,
  build_targets: Vec<BuildTarget>,
  derived: DerivedArtifacts,
  error: Option<String>,
  warning: Option<String>,
}

impl BuildConfiguration {
  /// Create a configuration for a freshly chosen build variant.
  pub fn new(info: &BuildInfo, kit: Arc<Kit>, project_file: &Path, settings: Arc<Settings>) -> Self {
    let mut bc = Self::bare(&info.display_name, kit, project_file, settings);
    bc.build_directory = bc.resolve_build_directory(&info.build_directory, &info.type_name, info.build_type);
    bc.initial_configuration = android::initial_configuration(&bc.kit).into();
    bc.set_configuration_for_generator(info.configuration.clone());

    debug!(
      name = %bc.display_name,
      kit = %bc.kit.id,
      build_dir = %bc.build_directory.display(),
      items = bc.configuration_for_generator.len(),
      "created build configuration"
    );
    bc
  }

  /// Restore a saved configuration.
  ///
  /// Entries that fail to decode are dropped with a warning; the number of
  /// dropped entries is returned alongside the configuration.
  pub fn from_persisted(
    state: &PersistedBuildConfiguration,
    kit: Arc<Kit>,
    project_file: &Path,
    settings: Arc<Settings>,
  ) -> (Self, usize) {
    let mut bc = Self::bare(&state.display_name, kit, project_file, settings);
    bc.build_directory = bc.resolve_build_directory(&state.build_directory, &state.display_name, BuildType::Unknown);

    let (configuration, dropped) = decode_configuration(&state.configuration);
    if dropped > 0 {
      warn!(name = %bc.display_name, dropped, "dropped unreadable configuration entries");
    }
    bc.set_configuration_for_generator(configuration);

    (bc, dropped)
  }

  pub fn to_persisted(&self) -> PersistedBuildConfiguration {
    PersistedBuildConfiguration {
      display_name: self.display_name.clone(),
      build_directory: self.build_directory.clone(),
      configuration: self.configuration_for_generator.encode(),
    }
  }

  fn bare(display_name: &str, kit: Arc<Kit>, project_file: &Path, settings: Arc<Settings>) -> Self {
    Self {
      display_name: display_name.to_string(),
      kit,
      project_file: project_file.to_path_buf(),
      source_directory: project_file.parent().map(Path::to_path_buf).unwrap_or_default(),
      build_directory: PathBuf::new(),
      environment: Environment::from_process(),
      settings,
      initial_configuration: ConfigSet::new(),
      configuration_for_generator: ConfigSet::new(),
      configuration_from_generator: ConfigSet::new(),
      build_targets: Vec::new(),
      derived: DerivedArtifacts::default(),
      error: None,
      warning: None,
    }
  }

  fn resolve_build_directory(&self, requested: &Path, name: &str, build_type: BuildType) -> PathBuf {
    if !requested.as_os_str().is_empty() {
      return requested.to_path_buf();
    }
    shadow_build_directory(
      &self.project_file,
      &self.kit,
      name,
      build_type,
      &self.settings.build_directory_template,
    )
  }

  /// Replace the stored configuration.
  ///
  /// The first configuration stored is layered on top of the initial and kit
  /// configurations; later ones replace the stored set outright.
  pub fn set_configuration_for_generator(&mut self, configuration: ConfigSet) {
    self.configuration_for_generator = if self.configuration_for_generator.is_empty() {
      ConfigSet::merge([
        self.initial_configuration.as_slice(),
        self.kit.configuration.as_slice(),
        configuration.as_slice(),
      ])
    } else {
      configuration
    };
    self.update_warning();
  }

  /// What the generator is asked to use: the kit configuration with the
  /// stored configuration on top.
  pub fn configuration_for_generator(&self) -> ConfigSet {
    ConfigSet::merge([
      self.kit.configuration.as_slice(),
      self.configuration_for_generator.as_slice(),
    ])
  }

  /// The stored configuration, without the kit layer.
  pub fn stored_configuration(&self) -> &ConfigSet {
    &self.configuration_for_generator
  }

  pub fn initial_configuration(&self) -> &ConfigSet {
    &self.initial_configuration
  }

  /// Apply user edits on top of the current configuration.
  pub fn apply_edits(&mut self, items: &[ConfigItem]) -> EditOutcome {
    let current = self.configuration_for_generator();
    self.set_configuration_for_generator(ConfigSet::merge([current.as_slice(), items]));

    let requires_clean = items.iter().any(|item| item.key.starts_with(ANDROID_BUILD_ABI_PREFIX));
    debug!(name = %self.display_name, edited = items.len(), requires_clean, "applied configuration edits");
    EditOutcome { requires_clean }
  }

  pub fn set_configuration_from_generator(&mut self, configuration: ConfigSet) {
    self.configuration_from_generator = configuration;
  }

  /// Configuration last reported back by the generator.
  pub fn configuration_from_generator(&self) -> &ConfigSet {
    &self.configuration_from_generator
  }

  /// Every stored key whose value contradicts the kit.
  pub fn overridden_kit_keys(&self) -> Vec<String> {
    overridden_keys(&self.configuration_for_generator, &self.kit.configuration, &self.kit)
  }

  fn update_warning(&mut self) {
    let overridden = override_detected(&self.configuration_for_generator, &self.kit.configuration, &self.kit);
    if overridden {
      debug!(name = %self.display_name, keys = ?self.overridden_kit_keys(), "kit configuration overridden");
    }
    self.warning = overridden.then(|| KIT_OVERRIDE_WARNING.to_string());
  }

  /// Replace the build targets and recompute derived artifacts.
  pub fn set_build_targets(&mut self, targets: Vec<BuildTarget>) {
    self.build_targets = targets;
    self.refresh_derived();
  }

  pub fn build_targets(&self) -> &[BuildTarget] {
    &self.build_targets
  }

  pub fn build_target_titles(&self) -> Vec<String> {
    self.build_targets.iter().map(|t| t.title.clone()).collect()
  }

  pub fn refresh_derived(&mut self) {
    self.derived = DerivedArtifacts::compute(
      &self.build_targets,
      &self.kit,
      &self.source_directory,
      &self.build_directory,
      &self.settings,
    );
  }

  pub fn derived(&self) -> &DerivedArtifacts {
    &self.derived
  }

  /// Build type recorded in the generator cache of the build directory.
  pub fn build_type(&self) -> BuildType {
    detect_build_type(&self.build_directory, &self.settings.cache_file_name)
  }

  /// Record a parse error. Returns true when this disables a previously
  /// enabled configuration.
  pub fn set_error(&mut self, message: &str) -> bool {
    let was_enabled = self.error.is_none();
    if message.is_empty() {
      return false;
    }
    self.error = Some(message.to_string());
    was_enabled
  }

  /// Clear the error. Returns true when the enabled state must be announced,
  /// which is always the case when `force` is set.
  pub fn clear_error(&mut self, force: bool) -> bool {
    self.error.take().is_some() || force
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn warning(&self) -> Option<&str> {
    self.warning.as_deref()
  }

  pub fn is_enabled(&self) -> bool {
    self.error.is_none()
  }

  pub fn disabled_reason(&self) -> Option<&str> {
    self.error()
  }

  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  pub fn kit(&self) -> &Arc<Kit> {
    &self.kit
  }

  /// Adopt a new kit snapshot. The override warning is re-evaluated.
  pub fn set_kit(&mut self, kit: Arc<Kit>) {
    self.kit = kit;
    self.update_warning();
  }

  pub fn project_file(&self) -> &Path {
    &self.project_file
  }

  pub fn source_directory(&self) -> &Path {
    &self.source_directory
  }

  pub fn build_directory(&self) -> &Path {
    &self.build_directory
  }

  pub fn set_build_directory(&mut self, dir: PathBuf) {
    self.build_directory = dir;
  }

  pub fn environment(&self) -> &Environment {
    &self.environment
  }

  pub fn set_environment(&mut self, environment: Environment) {
    self.environment = environment;
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  /// Everything the generator needs for one parse.
  pub fn parse_parameters(&self) -> ParseParameters {
    ParseParameters {
      source_directory: self.source_directory.clone(),
      build_directory: self.build_directory.clone(),
      kit: Arc::clone(&self.kit),
      environment: self.environment.clone(),
      configuration: self.configuration_for_generator(),
    }
  }
}
