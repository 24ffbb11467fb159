//! Variants command implementation.
//!
//! Lists every build variant a kit offers for a project together with the
//! shadow build directory it would use.

use std::path::Path;

use anyhow::Result;
use reconf_lib::build_config::available_builds;

use super::{load_kit, load_settings};
use crate::output::{print_json, print_stat, print_success};

pub fn cmd_variants(project_file: &Path, kit: Option<&Path>, json: bool) -> Result<()> {
  let kit = load_kit(kit)?;
  let settings = load_settings()?;
  let builds = available_builds(&kit, project_file, true, &settings);

  if json {
    return print_json(&builds);
  }

  for info in &builds {
    print_success(&info.display_name);
    print_stat("Type", &info.type_name);
    print_stat("Build directory", &info.build_directory.display().to_string());
    let items: Vec<String> = info.configuration.encode();
    print_stat("Configuration", &items.join(" "));
  }
  Ok(())
}
