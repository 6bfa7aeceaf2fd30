//! Serialized asset records
//!
//! The serializer writes each asset as a JSON array of exports. Exports refer
//! to each other by 1-based position (`{"export": N}`, 0 meaning "nothing"),
//! and to other assets by object reference (`["ShortName", "/Game/Full/Path"]`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Minimum serialization version we accept when the raw files are around to
/// re-serialize from
pub const DATA_VERSION: u64 = 27;

/// Key holding the serialization version on an asset's first export
pub const VERSION_KEY: &str = "_apoc_data_ver";

/// Key holding an export's type
pub const EXPORT_TYPE_KEY: &str = "export_type";

/// Key holding an export's object name
pub const OBJECT_NAME_KEY: &str = "_jwp_object_name";

/// One object within a serialized asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Export(Map<String, Value>);

impl Export {
    /// The export's type (`""` if the serializer didn't record one)
    pub fn export_type(&self) -> &str {
        self.0
            .get(EXPORT_TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The export's internal object name
    pub fn object_name(&self) -> Option<&str> {
        self.0.get(OBJECT_NAME_KEY).and_then(Value::as_str)
    }

    /// The serialization version tag, if this export carries one
    pub fn data_version(&self) -> Option<u64> {
        self.0.get(VERSION_KEY).and_then(Value::as_u64)
    }

    /// Get an attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check for an attribute
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Get a numeric attribute
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Walk nested keys starting at one of this export's attributes
    pub fn dig(&self, keys: &[&str]) -> Option<&Value> {
        let (first, rest) = keys.split_first()?;
        self.0.get(*first).and_then(|v| dig(v, rest))
    }

    /// Follow an `{"export": N}` attribute to its index
    pub fn export_ref(&self, key: &str) -> Option<usize> {
        self.0.get(key).and_then(export_ref)
    }

    /// Borrow the underlying attribute map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Export {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A deserialized asset: its exports, in serialization order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset {
    exports: Vec<Export>,
}

impl Asset {
    /// Build an asset from exports
    #[must_use]
    pub fn new(exports: Vec<Export>) -> Self {
        Self { exports }
    }

    /// Read a serialized asset from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// All exports in order
    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    /// Number of exports
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// Whether the serializer produced no exports at all
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    /// Export at a 1-based `index`; 0 is "no reference"
    pub fn export(&self, index: usize) -> Option<&Export> {
        index.checked_sub(1).and_then(|i| self.exports.get(i))
    }

    /// Exports of the given type, in order
    pub fn exports_of_type<'a>(&'a self, export_type: &'a str) -> impl Iterator<Item = &'a Export> + 'a {
        self.exports
            .iter()
            .filter(move |e| e.export_type() == export_type)
    }

    /// First export whose object name matches, case-insensitively
    pub fn export_named(&self, name: &str) -> Option<&Export> {
        self.exports.iter().find(|e| {
            e.object_name()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    /// Serialization version from the first export
    pub fn data_version(&self) -> Option<u64> {
        self.exports.first().and_then(Export::data_version)
    }

    /// Whether a non-empty asset predates the supported serialization version
    pub fn is_stale(&self) -> bool {
        !self.is_empty() && self.data_version().is_none_or(|v| v < DATA_VERSION)
    }
}

/// Path out of an object reference (`["ShortName", "/Game/Full/Path"]`)
pub fn object_path(value: &Value) -> Option<&str> {
    value.get(1).and_then(Value::as_str)
}

/// Index out of an export reference (`{"export": N}`)
pub fn export_ref(value: &Value) -> Option<usize> {
    value
        .get("export")
        .and_then(Value::as_u64)
        .map(|n| n as usize)
}

/// Walk nested object keys, e.g. `["Value", "BaseValueConstant"]`
pub fn dig<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |v, k| v.get(k))
}
