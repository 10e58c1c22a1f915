//! Shared Dictionary Store
//!
//! Translations read an immutable snapshot; imports build a merged copy and
//! swap it in under the write lock. A failed parse never touches the store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{Context, Result};

use super::registry::Dictionary;
use super::schema::DictionaryFile;
use crate::config::Config;

/// Cloneable handle to the process-wide dictionary
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    current: Arc<RwLock<Arc<Dictionary>>>,
}

impl DictionaryStore {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(dictionary))),
        }
    }

    /// Store seeded with the embedded dictionary
    pub fn builtin() -> Self {
        Self::new(Dictionary::builtin())
    }

    /// Build the store for a configuration
    ///
    /// Layering: built-in, then dictionary directories, then explicit files.
    /// Unreadable files in a directory are skipped; an explicit file that fails
    /// to import is an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Self::builtin();

        for dir in &config.dictionary_dirs {
            store.import_dir(dir)?;
        }

        for path in &config.dictionary_files {
            store.import_file(path)?;
        }

        Ok(store)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<Dictionary> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merge a parsed document into the store
    pub fn merge(&self, file: DictionaryFile) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut next = Dictionary::clone(&current);
        next.merge(file);
        *current = Arc::new(next);
    }

    /// Parse and merge an exchange document, returning the number of imported entries
    pub fn import_str(&self, content: &str) -> Result<usize> {
        let file = DictionaryFile::from_json(content)?;
        let count = file.entry_count();
        self.merge(file);
        Ok(count)
    }

    /// Import a dictionary file
    pub fn import_file(&self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file: {}", path.display()))?;

        let count = self
            .import_str(&content)
            .with_context(|| format!("Failed to import dictionary: {}", path.display()))?;

        log::info!("Imported {} entries from {}", count, path.display());
        Ok(count)
    }

    /// Import every `*.json` file in a directory, in path order
    ///
    /// Returns the number of files imported. A missing directory imports nothing.
    pub fn import_dir(&self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read dictionary directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_dictionary_file(path))
            .collect();
        paths.sort();

        let mut imported = 0;
        for path in paths {
            match self.import_file(&path) {
                Ok(_) => imported += 1,
                Err(e) => log::error!("{:#}", e),
            }
        }

        Ok(imported)
    }

    /// Export the current state as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        self.snapshot().to_file().to_json()
    }

    /// Export the current state to a file
    pub fn export_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write dictionary file: {}", path.display()))
    }
}

/// Whether a path names an importable dictionary document
pub fn is_dictionary_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
}
