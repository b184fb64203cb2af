//! The per-line highlight contract.
//!
//! Editors color a document line by line: for each line they need the
//! ordered `(kind, start column)` pairs of the tokens on it. Tokens that
//! span several lines (multi-line whitespace, block comments) are split,
//! contributing one entry per line they touch, at column 1 for every line
//! after the first.

use glossa_lexer_core::SourceBuffer;

use crate::lexer::scan;
use crate::token::TokenKind;

/// One highlight entry: a token kind starting at `column` (1-based, in
/// characters) on its line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineToken {
    pub kind: TokenKind,
    pub column: u32,
}

/// Tokenize `source` into per-line highlight entries.
///
/// The outer vec has one entry per source line (a document always has at
/// least one line; a trailing `\n` opens a final empty line, matching how
/// editors count). Diagnostics are dropped here: highlighting styles the
/// error tokens themselves, and callers that want details use
/// [`scan`](crate::scan).
pub fn highlight(source: &str) -> Vec<Vec<LineToken>> {
    let buffer = SourceBuffer::new(source);
    let result = scan(&buffer);

    let line_count = source.split('\n').count();
    let mut lines: Vec<Vec<LineToken>> = vec![Vec::new(); line_count];

    for token in &result.tokens {
        // Last line the token has at least one character on. The end
        // position is exclusive: a token ending in `\n` has end.column == 1
        // on the next line without occupying it.
        let last_line = if token.end.column == 1 && token.end.line > token.start.line {
            token.end.line - 1
        } else {
            token.end.line
        };

        for line in token.start.line..=last_line {
            let column = if line == token.start.line {
                token.start.column
            } else {
                1
            };
            if let Some(entries) = lines.get_mut(line as usize - 1) {
                entries.push(LineToken {
                    kind: token.kind,
                    column,
                });
            }
        }
    }
    lines
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{highlight, LineToken};
    use crate::token::TokenKind;

    #[test]
    fn empty_document_has_one_empty_line() {
        assert_eq!(highlight(""), vec![Vec::<LineToken>::new()]);
    }

    #[test]
    fn single_line_entries_in_order() {
        let lines = highlight("αν χ τότε");
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            vec![
                LineToken { kind: TokenKind::Keyword, column: 1 },
                LineToken { kind: TokenKind::Whitespace, column: 3 },
                LineToken { kind: TokenKind::Identifier, column: 4 },
                LineToken { kind: TokenKind::Whitespace, column: 5 },
                LineToken { kind: TokenKind::Keyword, column: 6 },
            ]
        );
    }

    #[test]
    fn columns_count_characters() {
        // "γράψε" is 10 bytes but 5 characters; the string after the space
        // starts at column 7.
        let lines = highlight("γράψε \"x\"");
        assert_eq!(lines[0][2].kind, TokenKind::StringLiteral);
        assert_eq!(lines[0][2].column, 7);
    }

    #[test]
    fn tokens_land_on_their_lines() {
        let lines = highlight("αν\nτότε");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].kind, TokenKind::Keyword);
        assert_eq!(lines[1][0].kind, TokenKind::Keyword);
        assert_eq!(lines[1][0].column, 1);
    }

    #[test]
    fn multi_line_comment_split_per_line() {
        let lines = highlight("/* α\nβ\nγ */ αν");
        assert_eq!(lines.len(), 3);
        // Opening on line 1, content continuing at column 1 on lines 2-3.
        assert!(lines[0].iter().all(|t| t.kind == TokenKind::Comment));
        assert_eq!(lines[1][0], LineToken { kind: TokenKind::Comment, column: 1 });
        assert_eq!(lines[2][0], LineToken { kind: TokenKind::Comment, column: 1 });
        assert_eq!(lines[2].last().unwrap().kind, TokenKind::Keyword);
    }

    #[test]
    fn trailing_newline_opens_empty_final_line() {
        let lines = highlight("αν\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], vec![]);
        // The newline itself belongs to line 1.
        assert_eq!(lines[0].last().unwrap().kind, TokenKind::Whitespace);
    }

    #[test]
    fn error_tokens_are_highlightable() {
        let lines = highlight("\"abc\nχ @");
        assert_eq!(lines[0][0].kind, TokenKind::InvalidString);
        assert_eq!(lines[1].last().unwrap().kind, TokenKind::Invalid);
    }
}
