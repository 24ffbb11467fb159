//! Application run targets derived from build targets.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::build_config::{BuildTarget, TargetType};
use crate::environment::Environment;
use crate::kit::Kit;
use crate::platform::host_requires_runtime_path;

/// Adjustment applied to a launch environment right before a target runs.
pub type EnvModifier = Arc<dyn Fn(&mut Environment) + Send + Sync>;

/// Something the user can launch.
#[derive(Clone)]
pub struct RunTarget {
  pub display_name: String,
  pub build_key: String,
  pub target_file_path: Option<PathBuf>,
  /// Source directory of the target, with a trailing separator.
  pub project_file_path: PathBuf,
  pub working_directory: PathBuf,
  env_modifier: EnvModifier,
}

impl RunTarget {
  /// Run the deferred environment adjustment against `env`.
  pub fn apply_environment(&self, env: &mut Environment) {
    (self.env_modifier)(env);
  }
}

impl fmt::Debug for RunTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RunTarget")
      .field("display_name", &self.display_name)
      .field("build_key", &self.build_key)
      .field("target_file_path", &self.target_file_path)
      .field("project_file_path", &self.project_file_path)
      .field("working_directory", &self.working_directory)
      .finish_non_exhaustive()
  }
}

impl PartialEq for RunTarget {
  fn eq(&self, other: &Self) -> bool {
    self.display_name == other.display_name
      && self.build_key == other.build_key
      && self.target_file_path == other.target_file_path
      && self.project_file_path == other.project_file_path
      && self.working_directory == other.working_directory
  }
}

/// Prepends the kit runtime directory to `PATH` on hosts that resolve shared
/// libraries through it. The host check runs at launch, not here.
fn runtime_path_modifier(kit: &Arc<Kit>) -> EnvModifier {
  let kit = Arc::clone(kit);
  Arc::new(move |env: &mut Environment| {
    if !host_requires_runtime_path() {
      return;
    }
    if let Some(dir) = &kit.runtime_path {
      env.prepend_or_set_path(dir);
    }
  })
}

/// Launchable targets among `targets`.
///
/// Executables always qualify. Dynamic libraries qualify only for kits whose
/// devices use libraries as application entry points.
pub fn application_targets(targets: &[BuildTarget], kit: &Arc<Kit>) -> Vec<RunTarget> {
  let libraries_are_apps = kit.device_type.packages_libraries_as_entry_points();

  targets
    .iter()
    .filter(|target| match target.target_type {
      TargetType::Executable => true,
      TargetType::DynamicLibrary => libraries_are_apps,
      TargetType::StaticLibrary | TargetType::Utility => false,
    })
    .map(|target| RunTarget {
      display_name: target.title.clone(),
      build_key: target.title.clone(),
      target_file_path: target.executable.clone(),
      project_file_path: with_trailing_separator(&target.source_directory),
      working_directory: target.working_directory.clone(),
      env_modifier: runtime_path_modifier(kit),
    })
    .collect()
}

fn with_trailing_separator(dir: &std::path::Path) -> PathBuf {
  let mut s = dir.as_os_str().to_os_string();
  if !dir.as_os_str().is_empty() && !dir.to_string_lossy().ends_with(['/', '\\']) {
    s.push("/");
  }
  PathBuf::from(s)
}
