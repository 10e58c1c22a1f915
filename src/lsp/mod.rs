//! LSP Protocol Implementation
//!
//! Hover, inlay hints, diagnostics and label symbols backed by the translator.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
