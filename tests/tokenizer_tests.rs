//! Tokenizer behavior on real-world lathe program lines
use nc_gloss::parser::{strip_comments, tokenize_line};

#[test]
fn test_glued_words_are_split() {
    assert_eq!(tokenize_line("G0X38.0"), vec!["G0", "X38.0"]);
    assert_eq!(tokenize_line("G28U0W0"), vec!["G28", "U0", "W0"]);
    assert_eq!(
        tokenize_line("N100G50S3000"),
        vec!["N100", "G50", "S3000"]
    );
}

#[test]
fn test_terminator_is_stripped() {
    assert_eq!(tokenize_line("M08;"), tokenize_line("M08"));
    assert_eq!(tokenize_line("G0X10.Z2.;"), vec!["G0", "X10.", "Z2."]);
}

#[test]
fn test_comments_are_removed() {
    assert_eq!(
        tokenize_line("G0 X10 (rapid move) Z5"),
        tokenize_line("G0 X10 Z5")
    );
    assert_eq!(tokenize_line("T0101(OD ROUGH)"), vec!["T0101"]);
    assert_eq!(strip_comments("(A)(B)C"), "C");
}

#[test]
fn test_blank_inputs() {
    for line in ["", " ", "\t", "()", "(ONLY A COMMENT)", ";;"] {
        assert!(tokenize_line(line).is_empty(), "line {:?}", line);
    }
}

#[test]
fn test_case_is_preserved() {
    assert_eq!(tokenize_line("g1x5"), vec!["g1", "x5"]);
}

#[test]
fn test_macro_words() {
    assert_eq!(
        tokenize_line("IF[#100GT5]GOTO20"),
        vec!["IF[#100", "GT5]", "GOTO20"]
    );
    assert_eq!(tokenize_line("#101=#101+1"), vec!["#101=#101+1"]);
}

#[test]
fn test_tokenize_is_deterministic() {
    let line = "N10 G1 X10.5 Z-2 F0.1 (finish)";
    assert_eq!(tokenize_line(line), tokenize_line(line));
}
