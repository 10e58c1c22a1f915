//! Translation Engine
//!
//! Turns classified tokens into a one-line gloss. Pure: the result depends only
//! on the line, the model and the dictionary passed in.

use std::cmp::Ordering;

use serde::Serialize;

use crate::dictionary::Dictionary;
use crate::parser::{BYTE_ORDER_MARK, PARAMETER_LETTERS, TokenClass, classify, tokenize_line};

/// Marker for a command code missing from the dictionary
pub const UNREGISTERED_PREFIX: &str = "未登録:";
/// Prefix for label words
pub const LABEL_PREFIX: &str = "ラベル";
/// Gloss for the `IF` keyword
pub const CONDITIONAL_GLOSS: &str = "条件分岐 IF";
/// Separator between primary descriptions
pub const PRIMARY_SEPARATOR: &str = " ／ ";

/// Result of translating one line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub text: String,
    pub has_unknown: bool,
    /// Unknown tokens in encounter order, uppercased
    pub unknown_tokens: Vec<String>,
}

/// One translated line of a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedLine {
    /// 1-based line number
    pub line_number: usize,
    pub source: String,
    pub text: String,
    pub has_unknown: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_tokens: Vec<String>,
}

/// Translate a single line of program text
pub fn translate_line(line: &str, dictionary: &Dictionary, model: Option<&str>) -> Translation {
    translate_tokens(&tokenize_line(line), dictionary, model)
}

/// Translate an already tokenized line
pub fn translate_tokens<S: AsRef<str>>(
    tokens: &[S],
    dictionary: &Dictionary,
    model: Option<&str>,
) -> Translation {
    if tokens.is_empty() {
        return Translation::default();
    }

    let mut primary: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();
    let mut unknown_tokens: Vec<String> = Vec::new();

    for token in tokens {
        match classify(token.as_ref()) {
            TokenClass::Command(code) => match dictionary.lookup(&code, model) {
                Some(description) => primary.push(description.to_string()),
                None => {
                    primary.push(format!("{}{}", UNREGISTERED_PREFIX, code));
                    unknown_tokens.push(code);
                }
            },
            TokenClass::Label(label) => primary.push(format!("{} {}", LABEL_PREFIX, label)),
            TokenClass::Conditional => primary.push(CONDITIONAL_GLOSS.to_string()),
            TokenClass::Jump(target) => primary.push(format!("GOTO {}", target)),
            TokenClass::Parameter(word)
            | TokenClass::IndexedVar(word)
            | TokenClass::Symbol(word) => params.push(word),
            TokenClass::Unknown(word) => {
                // Unknown words stay visible among the parameters
                unknown_tokens.push(word.clone());
                params.push(word);
            }
        }
    }

    let mut text = primary.join(PRIMARY_SEPARATOR);
    if !params.is_empty() {
        sort_parameters(&mut params);
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&params.join(" "));
    }

    Translation {
        text,
        has_unknown: !unknown_tokens.is_empty(),
        unknown_tokens,
    }
}

/// Translate a whole program, one result per line in input order
///
/// A leading byte order mark is dropped and CRLF line endings are normalized
/// first. Empty lines produce empty results.
pub fn translate_document(
    content: &str,
    dictionary: &Dictionary,
    model: Option<&str>,
) -> Vec<AnnotatedLine> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let normalized = content.replace("\r\n", "\n");

    normalized
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            let translation = translate_line(line, dictionary, model);
            AnnotatedLine {
                line_number: idx + 1,
                source: line.to_string(),
                text: translation.text,
                has_unknown: translation.has_unknown,
                unknown_tokens: translation.unknown_tokens,
            }
        })
        .collect()
}

/// Stable sort by parameter letter priority
///
/// Words starting with a letter from [`PARAMETER_LETTERS`] come first in that
/// letter order; all others follow in lexical order.
pub fn sort_parameters(params: &mut [String]) {
    params.sort_by(|a, b| compare_parameters(a, b));
}

fn compare_parameters(a: &str, b: &str) -> Ordering {
    match (letter_rank(a), letter_rank(b)) {
        (Some(ka), Some(kb)) => ka.cmp(&kb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn letter_rank(word: &str) -> Option<usize> {
    let first = word.chars().next()?;
    PARAMETER_LETTERS.find(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::builtin()
    }

    #[test]
    fn test_known_command_with_sorted_parameters() {
        let result = translate_line("G1X10Z-5S2000", &dictionary(), None);
        assert_eq!(result.text, "直線補間 X10 Z-5 S2000");
        assert!(!result.has_unknown);

        let result = translate_line("G1 S2000 Z-5 X10", &dictionary(), None);
        assert_eq!(result.text, "直線補間 X10 Z-5 S2000");
    }

    #[test]
    fn test_unregistered_command() {
        let result = translate_line("G999", &dictionary(), None);
        assert_eq!(result.text, "未登録:G999");
        assert!(result.has_unknown);
        assert_eq!(result.unknown_tokens, vec!["G999"]);
    }

    #[test]
    fn test_multiple_primary_entries() {
        let result = translate_line("N10 G0 M8", &dictionary(), None);
        assert_eq!(result.text, "ラベル N10 ／ 早送り移動 ／ クーラント ON");
    }

    #[test]
    fn test_empty_lines() {
        for line in ["", "   ", "(COMMENT ONLY)", ";"] {
            let result = translate_line(line, &dictionary(), None);
            assert_eq!(result, Translation::default(), "line {:?}", line);
        }
    }

    #[test]
    fn test_unknown_token_is_echoed() {
        let result = translate_line("G0 T0101", &dictionary(), None);
        assert_eq!(result.text, "早送り移動 T0101");
        assert!(result.has_unknown);
    }

    #[test]
    fn test_parameters_only_line_has_no_leading_space() {
        let result = translate_line("X10 U2", &dictionary(), None);
        assert_eq!(result.text, "X10 U2");
    }

    #[test]
    fn test_conditional_jump_line() {
        let result = translate_line("IF [#1 GT 5] GOTO100", &dictionary(), None);
        assert_eq!(result.text, "条件分岐 IF ／ GOTO 100 5] GT [#1");
        assert!(result.has_unknown);
        assert_eq!(result.unknown_tokens, vec!["[#1", "5]"]);
    }

    #[test]
    fn test_sort_parameters() {
        let mut params: Vec<String> = ["#5", "F0.1", "AND", "X1", "Z2", "X3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_parameters(&mut params);
        assert_eq!(params, vec!["X1", "X3", "Z2", "F0.1", "#5", "AND"]);
    }

    #[test]
    fn test_translate_document_keeps_lines() {
        let lines = translate_document("G0 X1\r\n\r\nG999\n", &dictionary(), None);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].source, "G0 X1");
        assert_eq!(lines[0].text, "早送り移動 X1");
        assert_eq!(lines[1].text, "");
        assert!(!lines[1].has_unknown);
        assert!(lines[2].has_unknown);
        assert_eq!(lines[2].line_number, 3);
        assert_eq!(lines[3].source, "");
    }

    #[test]
    fn test_translate_document_drops_byte_order_mark() {
        let lines = translate_document("\u{feff}G0 X1\nG0 X1", &dictionary(), None);

        assert_eq!(lines[0].source, "G0 X1");
        assert_eq!(lines[0].text, "早送り移動 X1");
        assert_eq!(lines[0].has_unknown, lines[1].has_unknown);
        assert!(!lines[0].has_unknown);
    }
}
