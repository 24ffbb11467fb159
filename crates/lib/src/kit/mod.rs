//! Kits: named bundles of toolchain and platform settings.
//!
//! A kit is shared by every build configuration of a target. Configurations
//! hold it as an `Arc<Kit>` snapshot and never mutate it; a kit update is
//! delivered as a fresh snapshot (see [`crate::reparse::Event::KitUpdated`]).

pub mod macros;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigSet;

/// Stable identifier of a kit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitId(pub String);

impl fmt::Display for KitId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for KitId {
  fn from(id: &str) -> Self {
    KitId(id.to_string())
  }
}

/// Family of device the kit builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
  #[default]
  Desktop,
  Android,
  BareMetal,
  RemoteLinux,
}

impl DeviceType {
  /// Android packages applications as shared libraries loaded by a launcher,
  /// so dynamic libraries are run targets there.
  pub fn packages_libraries_as_entry_points(&self) -> bool {
    matches!(self, Self::Android)
  }
}

/// `major.minor.patch` version of the kit's framework installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KitVersion {
  pub major: u32,
  pub minor: u32,
  pub patch: u32,
}

impl KitVersion {
  pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
    Self { major, minor, patch }
  }
}

impl fmt::Display for KitVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
  }
}

/// Android toolchain locations and preferences carried by Android kits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidSettings {
  pub ndk_location: PathBuf,
  pub sdk_location: PathBuf,
  /// Native platform, e.g. `android-21`.
  pub native_api_level: String,
  /// ABIs the application is built for, e.g. `arm64-v8a`.
  pub abis: Vec<String>,
}

/// Toolchain and platform settings shared by a target's build configurations.
///
/// A kit loaded with `android` settings is always an Android kit, whatever
/// `device_type` says.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "KitFields")]
pub struct Kit {
  pub id: KitId,
  pub display_name: String,
  pub device_type: DeviceType,
  /// Configuration every build configuration of this kit starts from.
  pub configuration: ConfigSet,
  /// Values for `%{NAME}` macros.
  pub macros: BTreeMap<String, String>,
  pub sysroot: Option<PathBuf>,
  pub target_triple: Option<String>,
  /// Directory holding runtime libraries needed to launch built binaries.
  pub runtime_path: Option<PathBuf>,
  pub version: Option<KitVersion>,
  pub android: Option<AndroidSettings>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct KitFields {
  id: KitId,
  display_name: String,
  device_type: DeviceType,
  configuration: ConfigSet,
  macros: BTreeMap<String, String>,
  sysroot: Option<PathBuf>,
  target_triple: Option<String>,
  runtime_path: Option<PathBuf>,
  version: Option<KitVersion>,
  android: Option<AndroidSettings>,
}

impl From<KitFields> for Kit {
  fn from(fields: KitFields) -> Self {
    let device_type = if fields.android.is_some() {
      DeviceType::Android
    } else {
      fields.device_type
    };
    Self {
      id: fields.id,
      display_name: fields.display_name,
      device_type,
      configuration: fields.configuration,
      macros: fields.macros,
      sysroot: fields.sysroot,
      target_triple: fields.target_triple,
      runtime_path: fields.runtime_path,
      version: fields.version,
      android: fields.android,
    }
  }
}

impl Kit {
  pub fn new(id: &str, display_name: &str) -> Self {
    Self {
      id: KitId::from(id),
      display_name: display_name.to_string(),
      ..Default::default()
    }
  }

  pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
    self.device_type = device_type;
    self
  }

  pub fn with_configuration(mut self, configuration: ConfigSet) -> Self {
    self.configuration = configuration;
    self
  }

  pub fn with_macro(mut self, name: &str, value: &str) -> Self {
    self.macros.insert(name.to_string(), value.to_string());
    self
  }

  pub fn with_sysroot(mut self, sysroot: impl Into<PathBuf>) -> Self {
    self.sysroot = Some(sysroot.into());
    self
  }

  pub fn with_target_triple(mut self, triple: &str) -> Self {
    self.target_triple = Some(triple.to_string());
    self
  }

  pub fn with_runtime_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.runtime_path = Some(path.into());
    self
  }

  pub fn with_version(mut self, version: KitVersion) -> Self {
    self.version = Some(version);
    self
  }

  pub fn with_android(mut self, android: AndroidSettings) -> Self {
    self.device_type = DeviceType::Android;
    self.android = Some(android);
    self
  }

  /// Display name reduced to characters that are safe in a directory name.
  pub fn file_system_name(&self) -> String {
    let name: String = self
      .display_name
      .chars()
      .map(|c| {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
          c
        } else {
          '_'
        }
      })
      .collect();
    if name.is_empty() { self.id.0.clone() } else { name }
  }

  /// Look up one macro: kit-provided names first, then the built-in `Kit:*` names.
  pub fn macro_value(&self, name: &str) -> Option<String> {
    if let Some(value) = self.macros.get(name) {
      return Some(value.clone());
    }
    match name {
      "Kit:Id" => Some(self.id.0.clone()),
      "Kit:DisplayName" => Some(self.display_name.clone()),
      "Kit:FileSystemName" => Some(self.file_system_name()),
      "Kit:Sysroot" => self.sysroot.as_ref().map(|p| p.display().to_string()),
      _ => None,
    }
  }

  /// Expand `%{NAME}` macros against this kit.
  pub fn expand(&self, input: &str) -> String {
    macros::expand(input, |name| self.macro_value(name))
  }
}
