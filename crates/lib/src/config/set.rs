use std::collections::HashSet;
use std::ops::Deref;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::item::ConfigItem;
use crate::kit::Kit;

/// An ordered, key-unique collection of configuration items.
///
/// Items are always sorted by key, so two sets with the same content compare
/// equal and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
  items: Vec<ConfigItem>,
}

impl ConfigSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Merge several item sequences into one set.
  ///
  /// The inputs are concatenated and, for every key, the occurrence closest
  /// to the end wins. Supply inputs least-authoritative first.
  pub fn merge<'a, I>(parts: I) -> Self
  where
    I: IntoIterator<Item = &'a [ConfigItem]>,
  {
    parts.into_iter().flatten().cloned().collect()
  }

  pub fn get(&self, key: &str) -> Option<&ConfigItem> {
    self
      .items
      .binary_search_by(|item| item.key.as_str().cmp(key))
      .ok()
      .map(|idx| &self.items[idx])
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.items.iter().map(|item| item.key.as_str())
  }

  pub fn as_slice(&self) -> &[ConfigItem] {
    &self.items
  }

  /// Encoded form of every item, in key order.
  pub fn encode(&self) -> Vec<String> {
    self.items.iter().map(ConfigItem::encode).collect()
  }
}

/// Drop earlier duplicates (last occurrence wins), drop null items, sort by key.
fn remove_duplicates(items: Vec<ConfigItem>) -> Vec<ConfigItem> {
  let mut known_keys = HashSet::with_capacity(items.len());
  let mut result = Vec::with_capacity(items.len());

  for item in items.into_iter().rev() {
    if item.is_null() || known_keys.contains(&item.key) {
      continue;
    }
    known_keys.insert(item.key.clone());
    result.push(item);
  }

  result.sort_by(|a, b| a.key.cmp(&b.key));
  result
}

impl FromIterator<ConfigItem> for ConfigSet {
  fn from_iter<T: IntoIterator<Item = ConfigItem>>(iter: T) -> Self {
    Self {
      items: remove_duplicates(iter.into_iter().collect()),
    }
  }
}

impl From<Vec<ConfigItem>> for ConfigSet {
  fn from(items: Vec<ConfigItem>) -> Self {
    Self {
      items: remove_duplicates(items),
    }
  }
}

impl Deref for ConfigSet {
  type Target = [ConfigItem];

  fn deref(&self) -> &Self::Target {
    &self.items
  }
}

impl IntoIterator for ConfigSet {
  type Item = ConfigItem;
  type IntoIter = std::vec::IntoIter<ConfigItem>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

impl<'a> IntoIterator for &'a ConfigSet {
  type Item = &'a ConfigItem;
  type IntoIter = std::slice::Iter<'a, ConfigItem>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

// Serialized as a list of encoded items.
impl Serialize for ConfigSet {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.encode().serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for ConfigSet {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let encoded = Vec::<String>::deserialize(deserializer)?;
    encoded
      .iter()
      .map(|s| ConfigItem::parse(s).map_err(D::Error::custom))
      .collect()
  }
}

/// Keys of `working` whose value differs from what the kit sets.
///
/// Both values are expanded through the kit's macros before comparing. A
/// working item marked unset counts as an override whenever the kit provides
/// the key.
pub fn overridden_keys(working: &ConfigSet, kit_config: &ConfigSet, kit: &Kit) -> Vec<String> {
  working
    .iter()
    .filter(|item| is_overridden(item, kit_config, kit))
    .map(|item| item.key.clone())
    .collect()
}

/// Returns true as soon as one item of `working` overrides the kit configuration.
pub fn override_detected(working: &ConfigSet, kit_config: &ConfigSet, kit: &Kit) -> bool {
  let detected = working.iter().find(|item| is_overridden(item, kit_config, kit));
  if let Some(item) = detected {
    debug!(key = %item.key, kit = %kit.id, "kit configuration overridden");
  }
  detected.is_some()
}

fn is_overridden(item: &ConfigItem, kit_config: &ConfigSet, kit: &Kit) -> bool {
  match kit_config.get(&item.key) {
    Some(kit_item) => item.is_unset || item.expanded_value(kit) != kit_item.expanded_value(kit),
    None => false,
  }
}
