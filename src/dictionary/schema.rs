//! Dictionary Exchange Format
//!
//! The JSON document used for import and export:
//!
//! ```json
//! { "baseDict": { "G1": "..." }, "modelDicts": { "BE12": { "M10": "..." } } }
//! ```
//!
//! Both fields are optional on import; a missing or `null` field merges nothing.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Code to description mapping
pub type CodeMap = BTreeMap<String, String>;

/// Root exchange document (matches JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_dict: CodeMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_dicts: BTreeMap<String, CodeMap>,
}

impl DictionaryFile {
    /// Parse an exchange document
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse dictionary JSON")
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize dictionary")
    }

    /// Total number of entries across both levels
    pub fn entry_count(&self) -> usize {
        self.base_dict.len() + self.model_dicts.values().map(BTreeMap::len).sum::<usize>()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
