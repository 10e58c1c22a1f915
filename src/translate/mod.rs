//! Line Translation
//!
//! Dictionary-driven glosses for tokenized program lines.

pub mod engine;

pub use engine::{
    AnnotatedLine, Translation, sort_parameters, translate_document, translate_line,
    translate_tokens,
};
