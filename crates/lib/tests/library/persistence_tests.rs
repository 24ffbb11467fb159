use std::fs;
use std::path::Path;
use std::sync::Arc;

use reconf_lib::build_config::{BuildConfiguration, PersistedBuildConfiguration};
use reconf_lib::config::ConfigItem;
use reconf_lib::settings::Settings;
use tempfile::TempDir;

use super::common::{PROJECT_FILE, build_configuration, kit_with};

#[test]
fn saved_configuration_restores_identically() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("debug.json");
  let kit = kit_with(&[("TOOLCHAIN", "gcc")]);
  let mut original = build_configuration(Arc::clone(&kit));
  original.apply_edits(&[ConfigItem::new("WITH_TESTS", "ON"), ConfigItem::unset("LEGACY")]);

  original.to_persisted().save(&path).unwrap();
  let state = PersistedBuildConfiguration::load(&path).unwrap();
  let (restored, dropped) =
    BuildConfiguration::from_persisted(&state, kit, Path::new(PROJECT_FILE), Arc::new(Settings::default()));

  assert_eq!(dropped, 0);
  assert_eq!(restored.stored_configuration(), original.stored_configuration());
  assert_eq!(restored.build_directory(), original.build_directory());
  assert_eq!(restored.display_name(), "Debug");
}

#[test]
fn hand_edited_state_file_loses_only_bad_entries() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("debug.json");
  fs::write(
    &path,
    r#"{
      "display_name": "Debug",
      "build_directory": "/work/build-debug",
      "configuration": ["CMAKE_BUILD_TYPE:STRING=Debug", "oops", "TOOLCHAIN:STRING=clang"]
    }"#,
  )
  .unwrap();

  let state = PersistedBuildConfiguration::load(&path).unwrap();
  let (restored, dropped) = BuildConfiguration::from_persisted(
    &state,
    kit_with(&[("TOOLCHAIN", "gcc")]),
    Path::new(PROJECT_FILE),
    Arc::new(Settings::default()),
  );

  assert_eq!(dropped, 1);
  assert_eq!(
    restored.configuration_for_generator().get("TOOLCHAIN").unwrap().value,
    "clang"
  );
  assert!(restored.warning().is_some());
}
