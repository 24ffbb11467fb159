//! Build and run environment variables.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Os;

/// A set of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
  vars: BTreeMap<String, String>,
}

impl Environment {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of the current process environment.
  ///
  /// Variables whose name or value is not valid UTF-8 are skipped.
  pub fn from_process() -> Self {
    Self {
      vars: std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect(),
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str)
  }

  pub fn set(&mut self, name: &str, value: &str) {
    self.vars.insert(name.to_string(), value.to_string());
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Put `dir` in front of `PATH`, creating the variable if needed.
  pub fn prepend_or_set_path(&mut self, dir: &Path) {
    let separator = Os::current().unwrap_or(Os::Linux).path_list_separator();
    let dir = dir.display().to_string();
    let value = match self.vars.get("PATH") {
      Some(existing) if !existing.is_empty() => format!("{}{}{}", dir, separator, existing),
      _ => dir,
    };
    self.vars.insert("PATH".to_string(), value);
  }
}

impl FromIterator<(String, String)> for Environment {
  fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
    Self {
      vars: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn prepend_creates_missing_path() {
    let mut env = Environment::new();
    env.prepend_or_set_path(Path::new("/opt/qt/bin"));
    assert_eq!(env.get("PATH"), Some("/opt/qt/bin"));
  }

  #[test]
  fn prepend_keeps_existing_entries() {
    let mut env = Environment::new();
    env.set("PATH", "/usr/bin");
    env.prepend_or_set_path(Path::new("/opt/qt/bin"));

    let separator = Os::current().unwrap_or(Os::Linux).path_list_separator();
    assert_eq!(env.get("PATH"), Some(format!("/opt/qt/bin{}/usr/bin", separator).as_str()));
  }

  #[test]
  #[serial]
  fn process_snapshot_reads_variables() {
    temp_env::with_var("RECONF_TEST_VALUE", Some("on"), || {
      assert_eq!(Environment::from_process().get("RECONF_TEST_VALUE"), Some("on"));
    });
  }

  #[cfg(unix)]
  #[test]
  #[serial]
  fn process_snapshot_skips_non_utf8_values() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let bad = OsStr::from_bytes(b"\xff\xfe");
    temp_env::with_vars(
      [("RECONF_TEST_BAD", Some(bad)), ("RECONF_TEST_GOOD", Some(OsStr::new("yes")))],
      || {
        let env = Environment::from_process();
        assert_eq!(env.get("RECONF_TEST_BAD"), None);
        assert_eq!(env.get("RECONF_TEST_GOOD"), Some("yes"));
      },
    );
  }
}
