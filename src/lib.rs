//! NC Program Annotator
//!
//! Line-by-line glosses for numeric-control (G-code/M-code) programs.
//!
//! This library provides:
//! - Line tokenizing and token classification
//! - Dictionary-driven translation with per-model override layers
//! - JSON dictionary import/export and hot reload
//! - A command-line annotator and an LSP server

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod lsp;
pub mod parser;
pub mod translate;

// Re-exports for clean public API
pub use config::Config;
pub use dictionary::{Dictionary, DictionaryFile, DictionaryStore};
pub use parser::{TokenClass, classify, tokenize_line};
pub use translate::{AnnotatedLine, Translation, translate_document, translate_line};
