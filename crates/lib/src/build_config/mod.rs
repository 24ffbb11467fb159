//! Build configurations: the persistent state of one (project, kit, variant).
//!
//! A [`BuildConfiguration`] owns the configuration handed to the generator,
//! what the generator reported back, the build targets of the last
//! successful parse and the artifacts derived from them. It never talks to
//! the generator itself; [`crate::reparse::ReparseCoordinator`] does that.

mod android;
mod configuration;
mod persist;
mod types;
mod variants;

pub use android::initial_configuration as android_initial_configuration;
pub use configuration::{BuildConfiguration, KIT_OVERRIDE_WARNING};
pub use persist::{PersistError, PersistedBuildConfiguration, decode_configuration};
pub use types::{BuildTarget, EditOutcome, TargetType};
pub(crate) use variants::normalize;
pub use variants::{BuildInfo, available_builds, create_build_info, shadow_build_directory};
