mod build_type;
mod deploy;
mod set;
mod show;
mod variants;

pub use build_type::cmd_build_type;
pub use deploy::cmd_deploy;
pub use set::cmd_set;
pub use show::cmd_show;
pub use variants::cmd_variants;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use reconf_lib::kit::Kit;
use reconf_lib::settings::Settings;

/// Kit from a JSON description, or a plain desktop kit.
fn load_kit(path: Option<&Path>) -> Result<Arc<Kit>> {
  let Some(path) = path else {
    return Ok(Arc::new(Kit::new("desktop", "Desktop")));
  };
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read kit {}", path.display()))?;
  let kit: Kit = serde_json::from_str(&content).with_context(|| format!("Invalid kit {}", path.display()))?;
  Ok(Arc::new(kit))
}

fn load_settings() -> Result<Arc<Settings>> {
  Ok(Arc::new(Settings::load().context("Failed to load settings")?))
}
