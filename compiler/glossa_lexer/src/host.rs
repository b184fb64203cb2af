//! Seams toward the rest of the editor.
//!
//! The lexer is one component of a larger teaching environment; these
//! traits are the contracts it shares with its neighbors. Only
//! [`DocumentHost`] is consumed here (the highlighter reads document text
//! through it); [`ExecutionEngine`] and [`OutputSink`] are defined here so
//! the engine and the shell agree on one vocabulary without depending on
//! each other.

use crate::highlight::{highlight, LineToken};

/// Where a running program writes its output.
pub trait OutputSink {
    /// Append text to the current output line.
    fn print(&mut self, text: &str);
    /// Append text and end the line.
    fn println(&mut self, text: &str);
    /// End the current line.
    fn newline(&mut self);
}

/// A Glossa interpreter as the editor shell sees it.
pub trait ExecutionEngine {
    /// Run `source`, streaming output into `output`.
    fn run(&mut self, source: &str, output: &mut dyn OutputSink);
    /// Hand the program one line of user input (ΔΙΑΒΑΣΕ).
    fn submit_input_line(&mut self, line: &str);
}

/// The editor buffer as the lexer sees it.
pub trait DocumentHost {
    /// Full document text.
    fn text(&self) -> String;
    /// Replace the whole document.
    fn replace_text(&mut self, text: String);
    /// Move the caret (1-based line and column).
    fn set_cursor(&mut self, line: u32, column: u32);
}

/// Highlight the host's current document.
pub fn highlight_document(host: &dyn DocumentHost) -> Vec<Vec<LineToken>> {
    highlight(&host.text())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{highlight_document, DocumentHost};
    use crate::token::TokenKind;

    struct FixedDocument {
        text: String,
        cursor: (u32, u32),
    }

    impl DocumentHost for FixedDocument {
        fn text(&self) -> String {
            self.text.clone()
        }

        fn replace_text(&mut self, text: String) {
            self.text = text;
        }

        fn set_cursor(&mut self, line: u32, column: u32) {
            self.cursor = (line, column);
        }
    }

    #[test]
    fn highlights_through_the_host() {
        let mut doc = FixedDocument {
            text: String::from("γράψε 42"),
            cursor: (1, 1),
        };
        let lines = highlight_document(&doc);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0].kind, TokenKind::Keyword);
        assert_eq!(lines[0][2].kind, TokenKind::IntegerLiteral);

        doc.replace_text(String::from("! μόνο σχόλιο"));
        doc.set_cursor(1, 1);
        assert_eq!(doc.cursor, (1, 1));
        let lines = highlight_document(&doc);
        assert_eq!(lines[0], vec![super::LineToken {
            kind: TokenKind::Comment,
            column: 1,
        }]);
    }
}
