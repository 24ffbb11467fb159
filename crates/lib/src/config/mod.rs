//! Generator configuration items and item sets.
//!
//! A [`ConfigItem`] is one `KEY:TYPE=VALUE` setting. A [`ConfigSet`] is the
//! deduplicated, key-sorted collection the rest of the crate works with.
//!
//! # Merging
//!
//! Every piece of configuration state is built with [`ConfigSet::merge`]:
//! inputs are concatenated and the occurrence of a key nearest to the end
//! wins. A build configuration's working set is therefore
//! `merge(initial, kit, existing, edits)`, most authoritative last.

mod item;
mod set;

pub use item::{ConfigItem, ConfigItemError, ItemType};
pub use set::{ConfigSet, override_detected, overridden_keys};
