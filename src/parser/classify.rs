//! Token Classification
//!
//! Every token falls into exactly one [`TokenClass`]. Rules are tried in a
//! fixed order and the first match wins; [`TokenClass::Unknown`] is the
//! catch-all.

/// Axis and modal-value letters, in display order
pub const PARAMETER_LETTERS: &str = "XYZUWIJKRSPFQ";

/// Comparison, logical and bracket words accepted as-is
pub const SYMBOLS: [&str; 10] = ["EQ", "NE", "GT", "LT", "GE", "LE", "[", "]", "AND", "OR"];

/// Classification of a single token
///
/// Owned text is always uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClass {
    /// G or M code such as "G01" or "M8"
    Command(String),
    /// Axis or value word such as "X10.5" or "S2000"
    Parameter(String),
    /// Sequence label such as "N100"
    Label(String),
    /// The `IF` keyword
    Conditional,
    /// Jump with its target, from "GOTO100" the target is "100"
    Jump(String),
    /// Numbered variable such as "#101"
    IndexedVar(String),
    /// Comparison, logical or bracket word
    Symbol(String),
    /// Anything else
    Unknown(String),
}

/// Classify one token
pub fn classify(token: &str) -> TokenClass {
    let upper = token.to_uppercase();

    if is_command(&upper) {
        TokenClass::Command(upper)
    } else if is_parameter(&upper) {
        TokenClass::Parameter(upper)
    } else if is_label(&upper) {
        TokenClass::Label(upper)
    } else if upper == "IF" {
        TokenClass::Conditional
    } else if let Some(target) = strict_jump_target(&upper) {
        TokenClass::Jump(target.to_string())
    } else if is_indexed_var(&upper) {
        TokenClass::IndexedVar(upper)
    } else if SYMBOLS.contains(&upper.as_str()) {
        TokenClass::Symbol(upper)
    } else if let Some(target) = loose_jump_target(&upper) {
        TokenClass::Jump(target.to_string())
    } else {
        TokenClass::Unknown(upper)
    }
}

/// `G` or `M` followed by digits only
fn is_command(token: &str) -> bool {
    token
        .strip_prefix(['G', 'M'])
        .is_some_and(is_ascii_digits)
}

/// Parameter letter, optional sign, then a number with at most one decimal point
fn is_parameter(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(letter) = chars.next() else {
        return false;
    };
    if !PARAMETER_LETTERS.contains(letter) {
        return false;
    }

    let value = chars.as_str();
    let number = value.strip_prefix(['+', '-']).unwrap_or(value);
    is_decimal(number)
}

fn is_decimal(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for ch in text.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

fn is_label(token: &str) -> bool {
    token
        .strip_prefix('N')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn strict_jump_target(token: &str) -> Option<&str> {
    token
        .strip_prefix("GOTO")
        .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Any non-blank remainder after `GOTO`, cut at the first whitespace
fn loose_jump_target(token: &str) -> Option<&str> {
    let rest = token.strip_prefix("GOTO")?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let target = &rest[..end];
    (!target.is_empty()).then_some(target)
}

fn is_indexed_var(token: &str) -> bool {
    token.strip_prefix('#').is_some_and(is_ascii_digits)
}

fn is_ascii_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
