//! Show command implementation.
//!
//! Loads a saved build configuration and prints the configuration the
//! generator would be invoked with.

use std::path::Path;

use anyhow::{Context, Result};
use reconf_lib::build_config::{BuildConfiguration, PersistedBuildConfiguration};

use super::{load_kit, load_settings};
use crate::output::{format_item, print_info, print_json, print_stat, print_success, print_warning, symbols};

pub fn cmd_show(state_path: &Path, kit: Option<&Path>, verbose: bool, json: bool) -> Result<()> {
  let state = PersistedBuildConfiguration::load(state_path)
    .with_context(|| format!("Failed to load build configuration {}", state_path.display()))?;
  let kit = load_kit(kit)?;
  let (config, dropped) = BuildConfiguration::from_persisted(&state, kit, Path::new(""), load_settings()?);
  let configuration = config.configuration_for_generator();

  if json {
    let output = serde_json::json!({
      "display_name": config.display_name(),
      "build_directory": config.build_directory(),
      "kit": config.kit().id,
      "configuration": configuration,
      "warning": config.warning(),
      "overridden": config.overridden_kit_keys(),
      "dropped": dropped,
    });
    return print_json(&output);
  }

  print_success(config.display_name());
  print_stat("Build directory", &config.build_directory().display().to_string());
  print_stat("Kit", &config.kit().display_name);
  print_stat("Items", &configuration.len().to_string());

  if configuration.is_empty() {
    println!();
    print_info("No configuration items.");
  } else {
    println!();
    for item in &configuration {
      println!("  {} {}", symbols::INFO, format_item(item));
      if verbose && !item.documentation.is_empty() {
        println!("      {}", item.documentation);
      }
    }
  }

  if dropped > 0 {
    print_warning(&format!("Skipped {} unreadable entries", dropped));
  }
  if let Some(warning) = config.warning() {
    print_warning(warning);
    if verbose {
      print_stat("Overridden", &config.overridden_kit_keys().join(", "));
    }
  }

  Ok(())
}
