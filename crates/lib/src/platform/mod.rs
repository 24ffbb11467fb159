//! Host platform queries.
//!
//! Only what the configuration layer needs: the host operating system (for
//! lazily evaluated run environment fixes) and per-user directories (for the
//! settings file).

pub mod os;
pub mod paths;

pub use os::Os;

/// Returns true when the host needs runtime libraries on `PATH` to launch binaries.
pub fn host_requires_runtime_path() -> bool {
  Os::current().is_some_and(|os| os.requires_runtime_path())
}
