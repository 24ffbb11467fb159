use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::kit::Kit;

/// Value type of a configuration item, as understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemType {
  Bool,
  FilePath,
  Path,
  #[default]
  String,
  Internal,
}

impl ItemType {
  /// Returns the generator's spelling of this type
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Bool => "BOOL",
      Self::FilePath => "FILEPATH",
      Self::Path => "PATH",
      Self::String => "STRING",
      Self::Internal => "INTERNAL",
    }
  }

  /// Parses a type name. Anything unrecognised is treated as `String`.
  pub fn from_name(name: &str) -> Self {
    match name {
      "BOOL" => Self::Bool,
      "FILEPATH" => Self::FilePath,
      "PATH" => Self::Path,
      "INTERNAL" => Self::Internal,
      _ => Self::String,
    }
  }
}

impl fmt::Display for ItemType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Errors produced when decoding an encoded configuration item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigItemError {
  /// Blank line or comment.
  #[error("empty configuration entry")]
  Empty,

  #[error("configuration entry has no key: {0:?}")]
  MissingKey(String),

  #[error("configuration entry has no '=': {0:?}")]
  MissingValue(String),
}

/// One key/value setting passed to or read from the generator.
///
/// Identity is the key: collections of items hold at most one item per key
/// (see [`super::ConfigSet`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigItem {
  pub key: String,
  pub value: String,
  pub item_type: ItemType,
  pub documentation: String,
  pub is_advanced: bool,
  pub is_unset: bool,
  pub in_generator_cache: bool,
  pub allowed_values: Vec<String>,
}

impl ConfigItem {
  /// Create a `String` item.
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
      ..Default::default()
    }
  }

  /// Create an item with an explicit type and documentation string.
  pub fn typed(
    key: impl Into<String>,
    item_type: ItemType,
    documentation: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
      item_type,
      documentation: documentation.into(),
      ..Default::default()
    }
  }

  /// Create an item that asks the generator to forget `key`.
  pub fn unset(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      is_unset: true,
      ..Default::default()
    }
  }

  pub fn with_allowed_values(mut self, values: Vec<String>) -> Self {
    self.allowed_values = values;
    self
  }

  /// A null item carries no key and is never persisted.
  pub fn is_null(&self) -> bool {
    self.key.is_empty()
  }

  /// The value with kit macros substituted.
  pub fn expanded_value(&self, kit: &Kit) -> String {
    kit.expand(&self.value)
  }

  /// Encode as `KEY:TYPE=VALUE`, or `unset KEY`. Null items encode to an empty string.
  pub fn encode(&self) -> String {
    if self.is_null() {
      return String::new();
    }
    if self.is_unset {
      return format!("unset {}", self.key);
    }
    format!("{}:{}={}", self.key, self.item_type, self.value)
  }

  /// Decode one encoded item.
  ///
  /// Accepts `KEY:TYPE=VALUE`, `KEY=VALUE` and `unset KEY`. Leading blanks are
  /// ignored and lines starting with `#` or `//` are comments.
  pub fn parse(input: &str) -> Result<Self, ConfigItemError> {
    let line = input.trim_start();
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
      return Err(ConfigItemError::Empty);
    }

    if let Some(rest) = line.strip_prefix("unset ") {
      let key = rest.trim();
      if key.is_empty() {
        return Err(ConfigItemError::MissingKey(input.to_string()));
      }
      return Ok(Self::unset(key));
    }

    // A second ':' before any '=' makes the line unusable.
    let mut colon = None;
    let mut equal = None;
    for (idx, c) in line.char_indices() {
      match c {
        ':' if colon.is_some() => break,
        ':' => colon = Some(idx),
        '=' => {
          equal = Some(idx);
          break;
        }
        _ => {}
      }
    }

    let Some(equal) = equal else {
      return Err(ConfigItemError::MissingValue(input.to_string()));
    };

    let key_end = colon.unwrap_or(equal);
    let key = line[..key_end].trim();
    if key.is_empty() {
      return Err(ConfigItemError::MissingKey(input.to_string()));
    }

    let item_type = colon
      .map(|c| ItemType::from_name(line[c + 1..equal].trim()))
      .unwrap_or_default();

    Ok(Self {
      key: key.to_string(),
      value: line[equal + 1..].to_string(),
      item_type,
      ..Default::default()
    })
  }
}

impl fmt::Display for ConfigItem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.encode())
  }
}

impl FromStr for ConfigItem {
  type Err = ConfigItemError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}
