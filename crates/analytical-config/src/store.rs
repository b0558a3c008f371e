//! Settings store abstraction and the in-memory implementation.
//!
//! # Design
//! - Callers receive the store explicitly instead of reaching for process-wide state.
//! - Each key maps to a slot that is either a real value or a deletion marker; every
//!   read treats a deleted slot exactly like a key that was never configured.
//! - Slot-level access (`slot`/`replace_slot`) exists so scoped overrides can capture
//!   and restore the precise prior state, including "never set".

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// State of a single configured key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// The key holds a real configuration value.
    Value(Value),
    /// The key is explicitly deleted and must read as not found.
    Deleted,
}

impl Setting {
    /// Borrow the configured value, or `None` for a deleted slot.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Deleted => None,
        }
    }

    /// Whether the slot is a deletion marker.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl From<Value> for Setting {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Mapping-like access to configuration state.
///
/// Implementors only provide slot access; value reads, writes and deletion are
/// derived from it so the "deleted reads as missing" rule holds for every store.
pub trait SettingsStore {
    /// Raw slot for `name`, including deletion markers. `None` means never set.
    fn slot(&self, name: &str) -> Option<&Setting>;

    /// Replace the slot for `name` (or remove it with `None`), returning the prior slot.
    fn replace_slot(&mut self, name: &str, slot: Option<Setting>) -> Option<Setting>;

    /// Configured value for `name`, treating deleted slots as absent.
    fn get(&self, name: &str) -> Option<&Value> {
        self.slot(name).and_then(Setting::value)
    }

    /// Whether `name` currently resolves to a value.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Configured value for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SettingNotFound`] when the key was never set or is deleted.
    fn setting(&self, name: &str) -> ConfigResult<&Value> {
        self.get(name).ok_or_else(|| ConfigError::SettingNotFound {
            name: name.to_string(),
        })
    }

    /// Store a value under `name`, returning the prior slot.
    fn set(&mut self, name: &str, value: Value) -> Option<Setting> {
        self.replace_slot(name, Some(Setting::Value(value)))
    }

    /// Mark `name` as deleted, returning the prior slot.
    fn delete(&mut self, name: &str) -> Option<Setting> {
        self.replace_slot(name, Some(Setting::Deleted))
    }

    /// Drop any slot for `name` so it reads as never set.
    fn remove(&mut self, name: &str) -> Option<Setting> {
        self.replace_slot(name, None)
    }
}

/// In-memory settings store keyed by setting name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Settings {
    slots: HashMap<String, Setting>,
}

impl Settings {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON object whose members become settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDocument`] when the root is not an object.
    pub fn from_json(document: Value) -> ConfigResult<Self> {
        let Value::Object(map) = document else {
            return Err(ConfigError::InvalidDocument {
                reason: "root must be an object",
            });
        };
        let settings = Self::from(map);
        debug!(count = settings.slots.len(), "loaded settings document");
        Ok(settings)
    }

    /// Parse a JSON settings document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidDocument`] when the root is not an object.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let document =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        Self::from_json(document)
    }

    /// Read and parse a JSON settings document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, plus any error
    /// reported by [`Settings::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            operation: "settings.read_document",
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Builder-style insert used when assembling fixtures.
    #[must_use]
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Iterate over live settings in unspecified order, skipping deleted slots.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .filter_map(|(name, slot)| slot.value().map(|value| (name.as_str(), value)))
    }

    /// Number of keys that currently resolve to a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no key currently resolves to a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsStore for Settings {
    fn slot(&self, name: &str) -> Option<&Setting> {
        self.slots.get(name)
    }

    fn replace_slot(&mut self, name: &str, slot: Option<Setting>) -> Option<Setting> {
        match slot {
            Some(slot) => self.slots.insert(name.to_string(), slot),
            None => self.slots.remove(name),
        }
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Settings> for Map<String, Value> {
    fn from(settings: Settings) -> Self {
        settings
            .slots
            .into_iter()
            .filter_map(|(name, slot)| match slot {
                Setting::Value(value) => Some((name, value)),
                Setting::Deleted => None,
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|(name, value)| (name.into(), Setting::Value(value)))
                .collect(),
        }
    }
}
