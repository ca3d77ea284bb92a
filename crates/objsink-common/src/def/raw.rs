//! Raw, unvalidated key/value configuration supplied by the host.

use crate::ConfigError;
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, btree_map};
use std::fs;
use std::path::Path;

/// Flat mapping of option names to raw string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    entries: BTreeMap<String, String>,
}

impl RawConfig {
    /// Create an empty raw configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a raw value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key was supplied.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Supplied keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load raw properties from a JSON5 file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading raw config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load raw properties from JSON5 contents.
    ///
    /// The document must be an object. Scalars are stored as their string
    /// form, arrays of scalars as comma separated lists and `null` entries
    /// are treated as absent.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading raw config from contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::DecodeFailed("expected object".to_string()));
        };
        from_object(map)
    }
}

fn from_object(map: Map<String, Value>) -> Result<RawConfig, ConfigError> {
    let mut raw = RawConfig::new();
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::Array(entries) => entries
                .iter()
                .map(|entry| scalar(entry, &key))
                .collect::<Result<Vec<_>, _>>()?
                .join(","),
            other => scalar(&other, &key)?,
        };
        raw.insert(key, rendered);
    }
    Ok(raw)
}

/// Render a scalar JSON value or reject nested structures.
fn scalar(value: &Value, key: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(value) => Ok(value.clone()),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        _ => Err(ConfigError::DecodeFailed(format!(
            "{key}: expected string, number, bool or array of those"
        ))),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for RawConfig {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<HashMap<String, String>> for RawConfig {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}
