//! Seed configuration for kits targeting Android.

use crate::config::{ConfigItem, ItemType};
use crate::kit::{Kit, KitVersion};

/// First framework version whose toolchain file needs the SDK location.
const SDK_REQUIRED_SINCE: KitVersion = KitVersion::new(5, 14, 0);

const PREFERRED_ABI: &str = "armeabi-v7a";
const FALLBACK_ABI: &str = "arm64-v8a";

/// Items an Android build configuration starts with. Empty for other kits.
pub fn initial_configuration(kit: &Kit) -> Vec<ConfigItem> {
  let Some(android) = &kit.android else {
    return Vec::new();
  };

  let ndk = android.ndk_location.display().to_string();
  let toolchain = android
    .ndk_location
    .join("build")
    .join("cmake")
    .join("android.toolchain.cmake");

  let mut items = vec![
    ConfigItem::typed(
      "ANDROID_NATIVE_API_LEVEL",
      ItemType::String,
      "Android native API level",
      android.native_api_level.as_str(),
    ),
    ConfigItem::typed("ANDROID_NDK", ItemType::Path, "Android NDK PATH", ndk),
    ConfigItem::typed(
      "CMAKE_TOOLCHAIN_FILE",
      ItemType::Path,
      "Android CMake toolchain file",
      toolchain.display().to_string(),
    ),
    ConfigItem::typed("ANDROID_ABI", ItemType::String, "Android ABI", preferred_abi(&android.abis))
      .with_allowed_values(android.abis.clone()),
  ];

  if kit.version.is_some_and(|v| v >= SDK_REQUIRED_SINCE) {
    items.push(ConfigItem::typed(
      "ANDROID_SDK",
      ItemType::Path,
      "Android SDK PATH",
      android.sdk_location.display().to_string(),
    ));
  }

  items.push(ConfigItem::typed("ANDROID_STL", ItemType::String, "", "c++_shared"));
  items.push(ConfigItem::typed(
    "CMAKE_FIND_ROOT_PATH",
    ItemType::String,
    "",
    "%{Qt:QT_INSTALL_PREFIX}",
  ));

  items
}

fn preferred_abi(abis: &[String]) -> String {
  if abis.iter().any(|abi| abi == PREFERRED_ABI) {
    PREFERRED_ABI.to_string()
  } else if abis.is_empty() || abis.iter().any(|abi| abi == FALLBACK_ABI) {
    FALLBACK_ABI.to_string()
  } else {
    abis[0].clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::kit::AndroidSettings;

  fn android_kit(abis: &[&str], version: KitVersion) -> Kit {
    Kit::new("android", "Android")
      .with_version(version)
      .with_android(AndroidSettings {
        ndk_location: "/ndk".into(),
        sdk_location: "/sdk".into(),
        native_api_level: "android-21".to_string(),
        abis: abis.iter().map(|s| s.to_string()).collect(),
      })
  }

  fn value<'a>(items: &'a [ConfigItem], key: &str) -> Option<&'a str> {
    items.iter().find(|i| i.key == key).map(|i| i.value.as_str())
  }

  #[test]
  fn desktop_kit_has_no_seed() {
    assert!(initial_configuration(&Kit::new("desk", "Desktop")).is_empty());
  }

  #[test]
  fn seeds_toolchain_items() {
    let items = initial_configuration(&android_kit(&["x86"], KitVersion::new(5, 15, 0)));

    assert_eq!(value(&items, "ANDROID_NATIVE_API_LEVEL"), Some("android-21"));
    assert_eq!(value(&items, "ANDROID_NDK"), Some("/ndk"));
    assert_eq!(
      value(&items, "CMAKE_TOOLCHAIN_FILE"),
      Some("/ndk/build/cmake/android.toolchain.cmake")
    );
    assert_eq!(value(&items, "ANDROID_SDK"), Some("/sdk"));
    assert_eq!(value(&items, "ANDROID_STL"), Some("c++_shared"));
    assert_eq!(value(&items, "CMAKE_FIND_ROOT_PATH"), Some("%{Qt:QT_INSTALL_PREFIX}"));
  }

  #[test]
  fn sdk_only_for_recent_versions() {
    let items = initial_configuration(&android_kit(&[], KitVersion::new(5, 13, 2)));
    assert_eq!(value(&items, "ANDROID_SDK"), None);
  }

  #[test]
  fn abi_preference() {
    let pick = |abis: &[&str]| {
      let items = initial_configuration(&android_kit(abis, KitVersion::new(5, 15, 0)));
      value(&items, "ANDROID_ABI").map(str::to_string)
    };

    assert_eq!(pick(&["arm64-v8a", "armeabi-v7a"]).as_deref(), Some("armeabi-v7a"));
    assert_eq!(pick(&["x86", "arm64-v8a"]).as_deref(), Some("arm64-v8a"));
    assert_eq!(pick(&[]).as_deref(), Some("arm64-v8a"));
    assert_eq!(pick(&["x86_64", "x86"]).as_deref(), Some("x86_64"));
  }

  #[test]
  fn abi_lists_allowed_values() {
    let items = initial_configuration(&android_kit(&["x86", "arm64-v8a"], KitVersion::new(5, 15, 0)));
    let abi = items.iter().find(|i| i.key == "ANDROID_ABI").unwrap();
    assert_eq!(abi.allowed_values, vec!["x86", "arm64-v8a"]);
  }
}
