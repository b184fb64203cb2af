//! Lexeme classification: words and operator runs to [`TokenKind`].

use crate::keywords;
use crate::normalize::normalize;
use crate::token::TokenKind;

/// Classify a word lexeme.
///
/// The lookup order is fixed: operator keyword, then type keyword, then
/// structural keyword, then identifier. Only the whole normalized word
/// counts, so `καιρός` is an identifier despite starting with `και`.
pub(crate) fn classify_word(lexeme: &str) -> TokenKind {
    let canonical = normalize(lexeme);
    if keywords::is_operator_keyword(&canonical) {
        TokenKind::OperatorKeyword
    } else if keywords::is_type_keyword(&canonical) {
        TokenKind::TypeKeyword
    } else if keywords::is_structural_keyword(&canonical) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    }
}

/// Classify an operator/delimiter run by exact text.
///
/// Runs the scanner produced that match neither table (say `<--` or `:=`)
/// fall back to `Operator`: a highlighter gains nothing from a harder
/// failure, and the parser will reject them with real context.
pub(crate) fn classify_op_run(lexeme: &str) -> TokenKind {
    match lexeme {
        "<-" | ">=" | "<=" | "<>" | "+" | "-" | "*" | "/" | "^" | ">" | "<" | "=" => {
            TokenKind::Operator
        }
        ":" | ".." | "," | "&" => TokenKind::Delimiter,
        _ => TokenKind::Operator,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{classify_op_run, classify_word};
    use crate::token::TokenKind;

    #[test]
    fn keyword_lookup_order() {
        assert_eq!(classify_word("και"), TokenKind::OperatorKeyword);
        assert_eq!(classify_word("ακεραια"), TokenKind::TypeKeyword);
        assert_eq!(classify_word("προγραμμα"), TokenKind::Keyword);
        assert_eq!(classify_word("εμβαδον"), TokenKind::Identifier);
    }

    #[test]
    fn accented_uppercase_forms_match() {
        assert_eq!(classify_word("ΠΡΌΓΡΑΜΜΑ"), TokenKind::Keyword);
        assert_eq!(classify_word("Τέλος_Προγράμματος"), TokenKind::Keyword);
        assert_eq!(classify_word("Ή"), TokenKind::OperatorKeyword);
        assert_eq!(classify_word("ΛΟΓΙΚΕΣ"), TokenKind::TypeKeyword);
    }

    #[test]
    fn operator_keyword_is_whole_word_only() {
        assert_eq!(classify_word("καιρός"), TokenKind::Identifier);
        assert_eq!(classify_word("μοδα"), TokenKind::Identifier);
        assert_eq!(classify_word("divx"), TokenKind::Identifier);
    }

    #[test]
    fn operators_and_delimiters() {
        assert_eq!(classify_op_run("<-"), TokenKind::Operator);
        assert_eq!(classify_op_run("<>"), TokenKind::Operator);
        assert_eq!(classify_op_run(".."), TokenKind::Delimiter);
        assert_eq!(classify_op_run(":"), TokenKind::Delimiter);
        assert_eq!(classify_op_run("&"), TokenKind::Delimiter);
    }

    #[test]
    fn unknown_run_falls_back_to_operator() {
        assert_eq!(classify_op_run("<--"), TokenKind::Operator);
        assert_eq!(classify_op_run(":="), TokenKind::Operator);
    }
}
