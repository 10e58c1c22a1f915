//! Code Dictionary
//!
//! Base descriptions, per-model override layers, the JSON exchange format and
//! the shared store used by the annotator and the language server.

pub mod registry;
pub mod schema;
pub mod store;
pub mod watcher;

pub use registry::Dictionary;
pub use schema::{CodeMap, DictionaryFile};
pub use store::DictionaryStore;
pub use watcher::DictionaryWatcher;
