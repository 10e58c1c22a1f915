//! Dictionary Registry
//!
//! Base code descriptions plus per-model override layers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::schema::{CodeMap, DictionaryFile};

static MODELINE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"nc_model\s*=\s*([^\s;()]+)").ok());

/// Layered code dictionary
///
/// Keys are stored uppercased so lookups are case-insensitive. `G0` and `G00`
/// stay distinct keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    base: CodeMap,
    models: BTreeMap<String, CodeMap>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary seeded from the embedded resource
    pub fn builtin() -> Self {
        let embedded = include_str!("../../resources/dictionaries/builtin.json");

        match DictionaryFile::from_json(embedded) {
            Ok(file) => Self::from(file),
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded dictionary: {:#}. Using minimal fallback.",
                    e
                );
                Self::minimal()
            }
        }
    }

    /// Minimal fallback in case the embedded resource fails to parse
    fn minimal() -> Self {
        let mut dictionary = Self::new();
        dictionary.insert_base("G0", "早送り移動");
        dictionary.insert_base("G1", "直線補間");
        dictionary
    }

    /// Add or replace a base entry
    pub fn insert_base(&mut self, code: &str, description: &str) {
        self.base
            .insert(code.to_uppercase(), description.to_string());
    }

    /// Add or replace an entry in a model's override layer
    pub fn insert_model(&mut self, model: &str, code: &str, description: &str) {
        self.models
            .entry(model.to_string())
            .or_default()
            .insert(code.to_uppercase(), description.to_string());
    }

    /// Look up a code, model layer first
    ///
    /// An unknown or absent model falls through to the base entries.
    pub fn lookup(&self, code: &str, model: Option<&str>) -> Option<&str> {
        let code = code.to_uppercase();

        model
            .and_then(|name| self.models.get(name))
            .and_then(|overrides| overrides.get(&code))
            .or_else(|| self.base.get(&code))
            .map(String::as_str)
    }

    /// Full effective mapping for a model
    pub fn effective(&self, model: Option<&str>) -> CodeMap {
        let mut merged = self.base.clone();
        if let Some(overrides) = model.and_then(|name| self.models.get(name)) {
            merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Whether a model has an override layer (possibly empty)
    pub fn has_model(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }

    /// Known model identifiers, sorted
    pub fn list_models(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    /// Merge an exchange document into this dictionary
    ///
    /// Imported keys overwrite existing ones; everything else is kept.
    pub fn merge(&mut self, file: DictionaryFile) {
        for (code, description) in file.base_dict {
            self.insert_base(&code, &description);
        }

        for (model, entries) in file.model_dicts {
            let layer = self.models.entry(model).or_default();
            for (code, description) in entries {
                layer.insert(code.to_uppercase(), description);
            }
        }
    }

    /// Snapshot as an exchange document
    pub fn to_file(&self) -> DictionaryFile {
        DictionaryFile {
            base_dict: self.base.clone(),
            model_dicts: self.models.clone(),
        }
    }

    /// Detect a model from a modeline in document content
    ///
    /// Only the first and last five lines are checked, and only models with a
    /// layer in this dictionary are returned.
    pub fn detect_modeline_model(&self, content: &str) -> Option<String> {
        let lines: Vec<&str> = content.lines().collect();
        let check_lines: Vec<&str> = if lines.len() <= 10 {
            lines
        } else {
            let mut check = Vec::new();
            check.extend_from_slice(&lines[0..5]);
            check.extend_from_slice(&lines[lines.len() - 5..]);
            check
        };

        let modeline_re = MODELINE_RE.as_ref()?;

        for line in check_lines {
            // (nc_model=BE12) or ; nc_model=BE12
            if let Some(captures) = modeline_re.captures(line) {
                let name = captures.get(1)?.as_str();
                if self.has_model(name) {
                    return Some(name.to_string());
                }
                log::debug!("Ignoring modeline for unknown model '{}'", name);
            }
        }

        None
    }
}

impl From<DictionaryFile> for Dictionary {
    fn from(file: DictionaryFile) -> Self {
        let mut dictionary = Self::new();
        dictionary.merge(file);
        dictionary
    }
}
