//! Artifacts derived from a successful parse: what can be run, what gets
//! deployed, and which build type the tree was configured with.

pub mod build_type;
pub mod deploy;
pub mod run_targets;

use std::path::Path;
use std::sync::Arc;

pub use build_type::{BuildType, GeneratorBuildType, build_type_from_raw, detect_build_type};
pub use deploy::{DeployableFile, DeployableType, DeploymentData, ManifestError, deployment_data};
pub use run_targets::{EnvModifier, RunTarget, application_targets};

use crate::build_config::BuildTarget;
use crate::kit::Kit;
use crate::settings::Settings;

/// Run targets and deployment data of one build configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedArtifacts {
  pub run_targets: Vec<RunTarget>,
  pub deployment: DeploymentData,
}

impl DerivedArtifacts {
  pub fn compute(
    targets: &[BuildTarget],
    kit: &Arc<Kit>,
    source_dir: &Path,
    build_dir: &Path,
    settings: &Settings,
  ) -> Self {
    Self {
      run_targets: application_targets(targets, kit),
      deployment: deployment_data(source_dir, build_dir, targets, &settings.deployment_file_name),
    }
  }
}
