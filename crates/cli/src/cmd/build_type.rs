use std::path::Path;

use anyhow::Result;
use reconf_lib::artifacts::{BuildType, detect_build_type};

use super::load_settings;
use crate::output::{print_info, print_json, print_success};

pub fn cmd_build_type(build_dir: &Path, json: bool) -> Result<()> {
  let settings = load_settings()?;
  let build_type = detect_build_type(build_dir, &settings.cache_file_name);

  if json {
    return print_json(&serde_json::json!({
      "build_directory": build_dir,
      "build_type": build_type,
    }));
  }

  match build_type {
    BuildType::Unknown => print_info(&format!("Build type of {} is unknown", build_dir.display())),
    known => print_success(&known.to_string()),
  }
  Ok(())
}
