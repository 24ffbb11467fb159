//! Names and defaults shared across the crate.

/// Application name used for per-user directories.
pub const APP_NAME: &str = "reconf";

/// Settings file looked up in the configuration directory.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Default template for shadow build directories, relative to the project directory.
pub const DEFAULT_BUILD_DIR_TEMPLATE: &str = "../%{Project:Name}-%{Kit:FileSystemName}-%{BuildConfig:Name}";

/// Default deployment manifest file name.
pub const DEFAULT_DEPLOYMENT_FILENAME: &str = "QtCreatorDeployment.txt";

/// Default generator cache file name inside the build directory.
pub const DEFAULT_CACHE_FILENAME: &str = "CMakeCache.txt";

/// Environment overrides for [`crate::settings::Settings`].
pub const ENV_BUILD_DIR_TEMPLATE: &str = "RECONF_BUILD_DIR_TEMPLATE";
pub const ENV_DEPLOYMENT_FILE: &str = "RECONF_DEPLOYMENT_FILE";
pub const ENV_CACHE_FILE: &str = "RECONF_CACHE_FILE";

/// Cache key holding the generator's build type.
pub const BUILD_TYPE_KEY: &str = "CMAKE_BUILD_TYPE";

/// Configuration keys whose edit invalidates the existing build tree.
pub const ANDROID_BUILD_ABI_PREFIX: &str = "ANDROID_BUILD_ABI_";
