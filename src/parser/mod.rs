//! NC Program Parser
//!
//! Line-local tokenizing and token classification.
//! No state is carried from one line to the next.

pub mod classify;
pub mod lexer;

pub use classify::{PARAMETER_LETTERS, SYMBOLS, TokenClass, classify};
pub use lexer::{BYTE_ORDER_MARK, strip_comments, tokenize_line};

/// Tokenize a line and classify every token
///
/// Convenience entry point for callers that want the classes without
/// translating them.
pub fn classify_line(line: &str) -> Vec<(String, TokenClass)> {
    tokenize_line(line)
        .into_iter()
        .map(|token| {
            let class = classify(&token);
            (token, class)
        })
        .collect()
}
