//! Deployment data: which local files go where on the device.
//!
//! # Manifest format
//!
//! ```text
//! /opt/myapp                 # first line: remote prefix
//! data/config.ini:etc        # local:remote, split at the last ':'
//! /abs/path/lib.so:/usr/lib
//! ```
//!
//! Relative local paths are resolved against the source directory, relative
//! remote directories against the prefix. Lines without a `:` are ignored.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::build_config::{BuildTarget, normalize};

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read deployment manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("deployment manifest is not valid UTF-8: {0}")]
  NotUtf8(PathBuf),

  #[error("deployment manifest has no prefix line: {0}")]
  MissingPrefix(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployableType {
  #[default]
  Normal,
  Executable,
}

/// One local file and the remote directory it is copied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployableFile {
  pub local_file_path: PathBuf,
  pub remote_directory: String,
  pub file_type: DeployableType,
}

impl DeployableFile {
  pub fn new(local_file_path: impl Into<PathBuf>, remote_directory: &str, file_type: DeployableType) -> Self {
    Self {
      local_file_path: local_file_path.into(),
      remote_directory: remote_directory.to_string(),
      file_type,
    }
  }

  /// Full destination path on the device.
  pub fn remote_file_path(&self) -> String {
    let name = self
      .local_file_path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    if self.remote_directory.ends_with('/') {
      format!("{}{}", self.remote_directory, name)
    } else {
      format!("{}/{}", self.remote_directory, name)
    }
  }
}

/// Files to deploy. Holds at most one entry per local file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeploymentData {
  files: Vec<DeployableFile>,
}

impl DeploymentData {
  /// Add `file`, replacing an existing entry for the same local file.
  pub fn add_file(&mut self, file: DeployableFile) {
    match self
      .files
      .iter_mut()
      .find(|f| f.local_file_path == file.local_file_path)
    {
      Some(existing) => *existing = file,
      None => self.files.push(file),
    }
  }

  pub fn deployable_for_local_file(&self, local: &Path) -> Option<&DeployableFile> {
    self.files.iter().find(|f| f.local_file_path == local)
  }

  pub fn deployable_for_remote_path(&self, remote: &str) -> Option<&DeployableFile> {
    self.files.iter().find(|f| f.remote_file_path() == remote)
  }

  pub fn files(&self) -> &[DeployableFile] {
    &self.files
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

/// Parsed deployment manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentManifest {
  /// Remote prefix, always ending in `/`.
  pub prefix: String,
  pub files: Vec<DeployableFile>,
}

/// Parse manifest `content`; `path` is only used for error reporting.
pub fn parse_manifest(content: &str, path: &Path, source_dir: &Path) -> Result<DeploymentManifest, ManifestError> {
  let mut lines = content.lines();
  let prefix = lines
    .next()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .ok_or_else(|| ManifestError::MissingPrefix(path.to_path_buf()))?;

  let prefix = if prefix.ends_with('/') {
    prefix.to_string()
  } else {
    format!("{}/", prefix)
  };

  let files = lines
    .filter_map(|line| line.rsplit_once(':'))
    .map(|(local, remote)| {
      let local = Path::new(local);
      let local = if local.is_relative() {
        source_dir.join(local)
      } else {
        local.to_path_buf()
      };
      let remote = if remote.starts_with('/') {
        remote.to_string()
      } else {
        format!("{}{}", prefix, remote)
      };
      DeployableFile::new(local, &remote, DeployableType::Normal)
    })
    .collect();

  Ok(DeploymentManifest { prefix, files })
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path, source_dir: &Path) -> Result<DeploymentManifest, ManifestError> {
  let bytes = fs::read(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let content = String::from_utf8(bytes).map_err(|_| ManifestError::NotUtf8(path.to_path_buf()))?;
  parse_manifest(&content, path, source_dir)
}

/// Manifest location: the source directory first, then the build directory.
pub fn find_manifest(source_dir: &Path, build_dir: &Path, file_name: &str) -> Option<PathBuf> {
  [source_dir, build_dir]
    .into_iter()
    .map(|dir| dir.join(file_name))
    .find(|candidate| candidate.is_file())
}

/// Deployment data for a build tree.
///
/// Without a manifest there is nothing to deploy. With one, its entries are
/// taken as-is and every executable or shared library target not already
/// covered (by local file or by destination) is added under the manifest
/// prefix, mirroring its location relative to the build directory. A
/// malformed manifest degrades to empty data.
pub fn deployment_data(
  source_dir: &Path,
  build_dir: &Path,
  targets: &[BuildTarget],
  file_name: &str,
) -> DeploymentData {
  let mut result = DeploymentData::default();

  let Some(manifest_path) = find_manifest(source_dir, build_dir, file_name) else {
    debug!(file = file_name, "no deployment manifest");
    return result;
  };

  let manifest = match load_manifest(&manifest_path, source_dir) {
    Ok(manifest) => manifest,
    Err(e) => {
      warn!(error = %e, "ignoring deployment manifest");
      return result;
    }
  };

  for file in manifest.files {
    result.add_file(file);
  }

  for target in targets.iter().filter(|t| t.target_type.is_deployable()) {
    let Some(executable) = target.executable.as_deref().filter(|p| !p.as_os_str().is_empty()) else {
      continue;
    };
    if result.deployable_for_local_file(executable).is_some() {
      continue;
    }

    let (build_root, artifact_dir) = comparable(build_dir, executable.parent().unwrap_or(Path::new("")));
    let relative = relative_path(&build_root, &artifact_dir);
    let remote_dir = if relative.is_empty() {
      manifest.prefix.trim_end_matches('/').to_string()
    } else {
      format!("{}{}", manifest.prefix, relative)
    };
    let remote_dir = if remote_dir.is_empty() { "/".to_string() } else { remote_dir };

    let file = DeployableFile::new(executable, &remote_dir, DeployableType::Executable);
    if result.deployable_for_remote_path(&file.remote_file_path()).is_some() {
      continue;
    }
    result.add_file(file);
  }

  result
}

/// Both paths canonicalized when both exist, otherwise both normalized lexically.
fn comparable(base: &Path, target: &Path) -> (PathBuf, PathBuf) {
  match (dunce::canonicalize(base), dunce::canonicalize(target)) {
    (Ok(base), Ok(target)) => (base, target),
    _ => (normalize(base), normalize(target)),
  }
}

/// `target` relative to `base`, with `/` separators. Empty when equal.
fn relative_path(base: &Path, target: &Path) -> String {
  let base: Vec<Component> = base.components().collect();
  let target: Vec<Component> = target.components().collect();

  let common = base.iter().zip(&target).take_while(|(a, b)| a == b).count();

  let parts: Vec<String> = std::iter::repeat_n("..".to_string(), base.len() - common)
    .chain(
      target[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    )
    .collect();

  parts.join("/")
}
