//! Shared fixtures: a scripted generator and a project recording notifications.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak};

use reconf_lib::artifacts::BuildType;
use reconf_lib::build_config::{BuildConfiguration, BuildInfo, BuildTarget};
use reconf_lib::config::{ConfigItem, ConfigSet};
use reconf_lib::kit::Kit;
use reconf_lib::reparse::{
  Generator, GeneratorError, ParseParameters, ProjectBuildSystem, ProjectNode, ReparseCoordinator, ReparseMode,
  RequestToken,
};
use reconf_lib::settings::Settings;

pub const PROJECT_FILE: &str = "/work/hello/CMakeLists.txt";

#[derive(Default)]
pub struct ScriptedGenerator {
  pub requests: Vec<(ParseParameters, ReparseMode, RequestToken)>,
  pub stops: usize,
  pub targets: Vec<BuildTarget>,
}

impl Generator for ScriptedGenerator {
  fn request_parse(
    &mut self,
    params: ParseParameters,
    mode: ReparseMode,
    token: RequestToken,
  ) -> Result<(), GeneratorError> {
    self.requests.push((params, mode, token));
    Ok(())
  }

  fn stop_parsing_and_clear_state(&mut self) {
    self.stops += 1;
  }

  fn take_build_targets(&mut self) -> Result<Vec<BuildTarget>, GeneratorError> {
    Ok(self.targets.clone())
  }

  fn take_configuration(&mut self) -> Result<ConfigSet, GeneratorError> {
    Ok(ConfigSet::new())
  }

  fn generate_project_tree(&mut self, known_files: &[PathBuf]) -> Result<ProjectNode, GeneratorError> {
    Ok(ProjectNode {
      path: PathBuf::from("/work/hello"),
      display_name: "hello".to_string(),
      files: known_files.to_vec(),
      children: Vec::new(),
    })
  }
}

#[derive(Default)]
pub struct RecordingProject {
  pub succeeded: Mutex<Vec<Vec<String>>>,
  pub failed: Mutex<Vec<String>>,
}

impl ProjectBuildSystem for RecordingProject {
  fn parsing_succeeded(&self, config: &BuildConfiguration) {
    self.succeeded.lock().unwrap().push(config.build_target_titles());
  }

  fn parsing_failed(&self, config: &BuildConfiguration) {
    self
      .failed
      .lock()
      .unwrap()
      .push(config.error().unwrap_or_default().to_string());
  }
}

pub fn kit_with(items: &[(&str, &str)]) -> Arc<Kit> {
  let configuration: ConfigSet = items.iter().map(|(k, v)| ConfigItem::new(*k, *v)).collect();
  Arc::new(Kit::new("desktop", "Desktop").with_configuration(configuration))
}

pub fn debug_info() -> BuildInfo {
  BuildInfo {
    type_name: "Debug".to_string(),
    display_name: "Debug".to_string(),
    build_type: BuildType::Debug,
    source_directory: PathBuf::from("/work/hello"),
    build_directory: PathBuf::from("/work/build-debug"),
    configuration: ConfigSet::new(),
  }
}

pub fn build_configuration(kit: Arc<Kit>) -> BuildConfiguration {
  BuildConfiguration::new(&debug_info(), kit, Path::new(PROJECT_FILE), Arc::new(Settings::default()))
}

pub fn coordinator(
  kit: Arc<Kit>,
  project: &Arc<RecordingProject>,
) -> ReparseCoordinator<ScriptedGenerator> {
  let weak: Weak<dyn ProjectBuildSystem> = Arc::downgrade(project) as Weak<dyn ProjectBuildSystem>;
  ReparseCoordinator::new(build_configuration(kit), ScriptedGenerator::default(), weak)
}
