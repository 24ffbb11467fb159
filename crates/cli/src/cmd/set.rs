//! Set command implementation.
//!
//! Merges user-supplied items into a saved build configuration, the same way
//! an edit in the configuration editor does, and writes it back.

use std::path::Path;

use anyhow::{Context, Result};
use reconf_lib::build_config::{BuildConfiguration, PersistedBuildConfiguration};
use reconf_lib::config::ConfigItem;

use super::{load_kit, load_settings};
use crate::output::{print_json, print_success, print_warning};

pub fn cmd_set(state_path: &Path, raw_items: &[String], kit: Option<&Path>, json: bool) -> Result<()> {
  let items = raw_items
    .iter()
    .map(|raw| ConfigItem::parse(raw).with_context(|| format!("Invalid configuration item '{}'", raw)))
    .collect::<Result<Vec<_>>>()?;

  let state = PersistedBuildConfiguration::load(state_path)
    .with_context(|| format!("Failed to load build configuration {}", state_path.display()))?;
  let kit = load_kit(kit)?;
  let (mut config, _) = BuildConfiguration::from_persisted(&state, kit, Path::new(""), load_settings()?);

  let outcome = config.apply_edits(&items);
  config
    .to_persisted()
    .save(state_path)
    .with_context(|| format!("Failed to save build configuration {}", state_path.display()))?;

  if json {
    let output = serde_json::json!({
      "state": state_path,
      "configuration": config.stored_configuration(),
      "requires_clean": outcome.requires_clean,
      "warning": config.warning(),
    });
    return print_json(&output);
  }

  print_success(&format!(
    "Updated {} item(s) in {}",
    items.len(),
    state_path.display()
  ));
  if outcome.requires_clean {
    print_warning("ABI selection changed; clean the build directory before the next build");
  }
  if let Some(warning) = config.warning() {
    print_warning(warning);
  }

  Ok(())
}
