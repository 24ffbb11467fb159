//! Deploy command implementation.
//!
//! Prints the deployment data of a build tree: the manifest entries plus
//! every deployable target the manifest does not already cover.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reconf_lib::artifacts::{DeployableType, deployment_data};
use reconf_lib::build_config::BuildTarget;

use super::load_settings;
use crate::output::{print_info, print_json, print_stat, print_success, symbols};

fn load_targets(path: Option<&Path>) -> Result<Vec<BuildTarget>> {
  let Some(path) = path else {
    return Ok(Vec::new());
  };
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read targets {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Invalid targets {}", path.display()))
}

pub fn cmd_deploy(source_dir: &Path, build_dir: &Path, targets: Option<&Path>, json: bool) -> Result<()> {
  let settings = load_settings()?;
  let targets = load_targets(targets)?;
  let data = deployment_data(source_dir, build_dir, &targets, &settings.deployment_file_name);

  if json {
    return print_json(&data);
  }

  if data.is_empty() {
    print_info(&format!("Nothing to deploy (no {} found)", settings.deployment_file_name));
    return Ok(());
  }

  print_success(&format!("{} file(s) to deploy", data.len()));
  print_stat("Manifest", &settings.deployment_file_name);
  println!();
  for file in data.files() {
    let marker = match file.file_type {
      DeployableType::Executable => " [executable]",
      DeployableType::Normal => "",
    };
    println!(
      "  {} {} {} {}{}",
      symbols::INFO,
      file.local_file_path.display(),
      symbols::ARROW,
      file.remote_file_path(),
      marker
    );
  }
  Ok(())
}
