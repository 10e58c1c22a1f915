//! NC Program Lexer
//!
//! Splits one line of program text into word tokens.
//! Comments and trailing `;` terminators are dropped, glued words such as
//! `G28U0W0` are broken apart at every letter that follows a non-letter.

/// Byte order mark, trimmed like whitespace
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Tokenize a single line of NC program text.
///
/// Tokens are returned in left-to-right order. A line that is empty once
/// comments and terminators are removed yields no tokens.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let without_comments = strip_comments(line);
    let cleaned = without_comments
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .trim_end_matches(';');

    let mut tokens = Vec::new();
    for segment in cleaned.split(' ').filter(|s| !s.is_empty()) {
        split_glued_words(segment, &mut tokens);
    }

    tokens
}

/// Remove every `(...)` span from a line.
///
/// Each `(` is closed by the first `)` after it. Nesting is not tracked, and an
/// opening parenthesis with no closing one is left in place.
pub fn strip_comments(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find('(') {
        match rest[open + 1..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + 1 + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Split a space-free segment wherever a letter follows a non-letter
fn split_glued_words(segment: &str, tokens: &mut Vec<String>) {
    let mut current = String::new();

    for ch in segment.chars() {
        let prev_is_letter = current
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic());

        if ch.is_ascii_alphabetic() && !current.is_empty() && !prev_is_letter {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_line() {
        assert_eq!(tokenize_line("G1 X10 Z20"), vec!["G1", "X10", "Z20"]);
    }

    #[test]
    fn test_tokenize_glued_words() {
        assert_eq!(tokenize_line("G0X38.0"), vec!["G0", "X38.0"]);
        assert_eq!(tokenize_line("G28U0W0"), vec!["G28", "U0", "W0"]);
    }

    #[test]
    fn test_letters_stay_together() {
        assert_eq!(tokenize_line("GOTO100"), vec!["GOTO100"]);
        assert_eq!(tokenize_line("IF[#1EQ2]"), vec!["IF[#1", "EQ2]"]);
    }

    #[test]
    fn test_trailing_terminators() {
        assert_eq!(tokenize_line("M08;"), tokenize_line("M08"));
        assert_eq!(tokenize_line("M08;;;"), vec!["M08"]);
        assert_eq!(tokenize_line("G1 X5 ;"), vec!["G1", "X5"]);
    }

    #[test]
    fn test_inner_semicolon_is_kept() {
        assert_eq!(tokenize_line("G1;X5"), vec!["G1;", "X5"]);
    }

    #[test]
    fn test_paren_comment_removed() {
        assert_eq!(
            tokenize_line("G0 X10 (rapid move) Z5"),
            tokenize_line("G0 X10 Z5")
        );
        assert_eq!(tokenize_line("G0(a)X1(b)"), vec!["G0", "X1"]);
    }

    #[test]
    fn test_comment_only_and_blank_lines() {
        assert!(tokenize_line("").is_empty());
        assert!(tokenize_line("    ").is_empty());
        assert!(tokenize_line("(PROGRAM START)").is_empty());
        assert!(tokenize_line(" ; ").is_empty());
    }

    #[test]
    fn test_unbalanced_paren_left_in_place() {
        assert_eq!(strip_comments("G1 (open"), "G1 (open");
        assert_eq!(strip_comments("(a(b)c)"), "c)");
    }

    #[test]
    fn test_byte_order_mark_trimmed() {
        assert_eq!(tokenize_line("\u{feff}G0 X1"), vec!["G0", "X1"]);
        assert!(tokenize_line("\u{feff}").is_empty());
    }

    #[test]
    fn test_multiple_spaces_collapse() {
        assert_eq!(tokenize_line("G1   X1    Y2"), vec!["G1", "X1", "Y2"]);
    }
}
