//! Line/column tracking over the token stream.
//!
//! The scanner deals in byte offsets only. This layer walks each lexeme
//! once to maintain the editor-facing position: 1-based line, 1-based
//! column counted in characters (a Greek letter is one column even though
//! it is two bytes).

/// A location in the source document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    /// Byte offset, 0-based.
    pub offset: u32,
    /// Line number, 1-based.
    pub line: u32,
    /// Column, 1-based, counted in characters.
    pub column: u32,
}

impl Position {
    /// Start of the document.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

/// Accumulates positions as tokens stream by.
///
/// Tokens arrive in source order and cover every byte, so a single running
/// position is enough; no per-token rescanning.
#[derive(Debug)]
pub(crate) struct PositionTracker {
    current: Position,
}

impl PositionTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: Position::START,
        }
    }

    /// Walk one lexeme; returns its start position and the position one
    /// past its end.
    ///
    /// `\n` starts a new line. `\r` counts as an ordinary column: CRLF
    /// advances the line exactly once, at the `\n`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "len_utf8 is at most 4"
    )]
    pub(crate) fn advance(&mut self, lexeme: &str) -> (Position, Position) {
        let start = self.current;
        for c in lexeme.chars() {
            self.current.offset += c.len_utf8() as u32;
            if c == '\n' {
                self.current.line += 1;
                self.current.column = 1;
            } else {
                self.current.column += 1;
            }
        }
        (start, self.current)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Position, PositionTracker};

    #[test]
    fn starts_at_line_one_column_one() {
        let mut tracker = PositionTracker::new();
        let (start, _) = tracker.advance("αν");
        assert_eq!(start, Position::START);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let mut tracker = PositionTracker::new();
        let (_, end) = tracker.advance("γράψε");
        assert_eq!(end.offset, 10);
        assert_eq!(end.column, 6);
        assert_eq!(end.line, 1);
    }

    #[test]
    fn newline_resets_column() {
        let mut tracker = PositionTracker::new();
        tracker.advance("αν\n");
        let (start, _) = tracker.advance("χ");
        assert_eq!(start.line, 2);
        assert_eq!(start.column, 1);
    }

    #[test]
    fn crlf_advances_one_line() {
        let mut tracker = PositionTracker::new();
        let (_, end) = tracker.advance("α\r\n\r\n");
        assert_eq!(end.line, 3);
        assert_eq!(end.column, 1);
    }

    #[test]
    fn positions_chain_across_tokens() {
        let mut tracker = PositionTracker::new();
        let (_, first_end) = tracker.advance("για");
        let (second_start, _) = tracker.advance(" ");
        assert_eq!(first_end, second_start);
    }
}
