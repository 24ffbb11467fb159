//! Build variants offered for a kit, and where their build trees go.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::artifacts::{BuildType, GeneratorBuildType};
use crate::config::{ConfigItem, ConfigSet, ItemType};
use crate::consts::BUILD_TYPE_KEY;
use crate::kit::Kit;
use crate::settings::Settings;

/// One build variant a configuration can be created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
  pub type_name: String,
  pub display_name: String,
  pub build_type: BuildType,
  pub source_directory: PathBuf,
  /// Empty means "derive a shadow build directory".
  pub build_directory: PathBuf,
  pub configuration: ConfigSet,
}

/// Describe the `ty` variant for `kit`.
pub fn create_build_info(kit: &Kit, source_dir: &Path, ty: GeneratorBuildType) -> BuildInfo {
  let build_type_value = match ty {
    GeneratorBuildType::None => "",
    other => other.type_name(),
  };

  let mut items = vec![ConfigItem::typed(BUILD_TYPE_KEY, ItemType::String, "", build_type_value)];

  if let Some(sysroot) = &kit.sysroot {
    items.push(ConfigItem::typed(
      "CMAKE_SYSROOT",
      ItemType::Path,
      "",
      sysroot.display().to_string(),
    ));
    if let Some(triple) = &kit.target_triple {
      items.push(ConfigItem::typed("CMAKE_C_COMPILER_TARGET", ItemType::String, "", triple.as_str()));
      items.push(ConfigItem::typed("CMAKE_CXX_COMPILER_TARGET", ItemType::String, "", triple.as_str()));
    }
  }

  BuildInfo {
    type_name: ty.type_name().to_string(),
    display_name: ty.display_name().to_string(),
    build_type: ty.build_type(),
    source_directory: source_dir.to_path_buf(),
    build_directory: PathBuf::new(),
    configuration: items.into(),
  }
}

/// Every variant for `kit`.
///
/// For project setup the source directory is the project directory and each
/// variant gets its shadow build directory; otherwise the project file path
/// is used as-is and build directories are left empty.
pub fn available_builds(kit: &Kit, project_file: &Path, for_setup: bool, settings: &Settings) -> Vec<BuildInfo> {
  let source = if for_setup {
    project_directory(project_file)
  } else {
    project_file.to_path_buf()
  };

  GeneratorBuildType::ALL
    .into_iter()
    .map(|ty| {
      let mut info = create_build_info(kit, &source, ty);
      if for_setup {
        info.build_directory = shadow_build_directory(
          project_file,
          kit,
          &info.type_name,
          info.build_type,
          &settings.build_directory_template,
        );
      }
      info
    })
    .collect()
}

/// Default out-of-source build directory for a configuration.
///
/// `template` is expanded with the `Project:Name`, `BuildConfig:Name` and
/// `BuildConfig:Type` macros plus the kit's macros; spaces become `-` and the
/// result is resolved against the project directory.
pub fn shadow_build_directory(
  project_file: &Path,
  kit: &Kit,
  name: &str,
  build_type: BuildType,
  template: &str,
) -> PathBuf {
  if project_file.as_os_str().is_empty() {
    return PathBuf::new();
  }

  let project_dir = project_directory(project_file);
  let project_name = project_dir
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();

  let expanded = crate::kit::macros::expand(template, |macro_name| match macro_name {
    "Project:Name" => Some(project_name.clone()),
    "BuildConfig:Name" => Some(name.to_string()),
    "BuildConfig:Type" => Some(build_type.to_string()),
    other => kit.macro_value(other),
  });

  normalize(&project_dir.join(expanded.replace(' ', "-")))
}

fn project_directory(project_file: &Path) -> PathBuf {
  project_file.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Lexically resolve `.` and `..` components.
pub(crate) fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push("..");
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEMPLATE: &str = "../%{Project:Name}-%{Kit:FileSystemName}-%{BuildConfig:Name}";

  mod build_info {
    use super::*;

    #[test]
    fn seeds_build_type() {
      let kit = Kit::new("desk", "Desktop");

      let info = create_build_info(&kit, Path::new("/src"), GeneratorBuildType::RelWithDebInfo);

      assert_eq!(info.type_name, "RelWithDebInfo");
      assert_eq!(info.display_name, "Release with Debug Information");
      assert_eq!(info.build_type, BuildType::Profile);
      assert_eq!(info.configuration.get(BUILD_TYPE_KEY).unwrap().value, "RelWithDebInfo");
      assert_eq!(info.configuration.len(), 1);
    }

    #[test]
    fn plain_build_has_empty_build_type() {
      let info = create_build_info(&Kit::new("desk", "Desktop"), Path::new("/src"), GeneratorBuildType::None);

      assert_eq!(info.type_name, "Build");
      assert_eq!(info.build_type, BuildType::Unknown);
      assert_eq!(info.configuration.get(BUILD_TYPE_KEY).unwrap().value, "");
    }

    #[test]
    fn cross_kit_adds_sysroot_and_targets() {
      let kit = Kit::new("cross", "Cross")
        .with_sysroot("/sysroot")
        .with_target_triple("aarch64-linux-gnu");

      let info = create_build_info(&kit, Path::new("/src"), GeneratorBuildType::Debug);

      assert_eq!(info.configuration.get("CMAKE_SYSROOT").unwrap().value, "/sysroot");
      assert_eq!(
        info.configuration.get("CMAKE_C_COMPILER_TARGET").unwrap().value,
        "aarch64-linux-gnu"
      );
      assert_eq!(
        info.configuration.get("CMAKE_CXX_COMPILER_TARGET").unwrap().value,
        "aarch64-linux-gnu"
      );
    }

    #[test]
    fn sysroot_without_triple() {
      let kit = Kit::new("cross", "Cross").with_sysroot("/sysroot");
      let info = create_build_info(&kit, Path::new("/src"), GeneratorBuildType::Debug);

      assert!(info.configuration.contains_key("CMAKE_SYSROOT"));
      assert!(!info.configuration.contains_key("CMAKE_C_COMPILER_TARGET"));
    }
  }

  mod shadow {
    use super::*;

    #[test]
    fn expands_template_next_to_project() {
      let kit = Kit::new("desk", "Desktop");

      let dir = shadow_build_directory(
        Path::new("/work/hello/CMakeLists.txt"),
        &kit,
        "Debug",
        BuildType::Debug,
        TEMPLATE,
      );

      assert_eq!(dir, PathBuf::from("/work/hello-Desktop-Debug"));
    }

    #[test]
    fn spaces_become_dashes() {
      let kit = Kit::new("desk", "Desktop");

      let dir = shadow_build_directory(
        Path::new("/work/my app/CMakeLists.txt"),
        &kit,
        "Release with Debug Information",
        BuildType::Profile,
        "build %{BuildConfig:Name} %{BuildConfig:Type}",
      );

      assert_eq!(
        dir,
        PathBuf::from("/work/my app/build-Release-with-Debug-Information-Profile")
      );
    }

    #[test]
    fn absolute_template_ignores_project_directory() {
      let kit = Kit::new("desk", "Desktop").with_macro("BUILD_ROOT", "/builds");

      let dir = shadow_build_directory(
        Path::new("/work/hello/CMakeLists.txt"),
        &kit,
        "Debug",
        BuildType::Debug,
        "%{BUILD_ROOT}/%{Project:Name}",
      );

      assert_eq!(dir, PathBuf::from("/builds/hello"));
    }

    #[test]
    fn empty_project_path_gives_empty_directory() {
      let kit = Kit::new("desk", "Desktop");
      let dir = shadow_build_directory(Path::new(""), &kit, "Debug", BuildType::Debug, TEMPLATE);
      assert_eq!(dir, PathBuf::new());
    }
  }

  #[test]
  fn setup_offers_every_variant_with_directories() {
    let kit = Kit::new("desk", "Desktop");
    let settings = Settings::default();

    let builds = available_builds(&kit, Path::new("/work/hello/CMakeLists.txt"), true, &settings);

    let names: Vec<_> = builds.iter().map(|b| b.type_name.as_str()).collect();
    assert_eq!(names, vec!["Build", "Debug", "Release", "MinSizeRel", "RelWithDebInfo"]);
    assert!(builds.iter().all(|b| b.source_directory == Path::new("/work/hello")));
    assert_eq!(builds[1].build_directory, PathBuf::from("/work/hello-Desktop-Debug"));
  }

  #[test]
  fn non_setup_leaves_directories_empty() {
    let kit = Kit::new("desk", "Desktop");
    let builds = available_builds(&kit, Path::new("/work/hello/CMakeLists.txt"), false, &Settings::default());

    assert!(builds.iter().all(|b| b.build_directory.as_os_str().is_empty()));
    assert_eq!(builds[0].source_directory, PathBuf::from("/work/hello/CMakeLists.txt"));
  }
}
