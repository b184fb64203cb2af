//! Scan diagnostics.
//!
//! The lexer never fails; everything wrong with the input is collected
//! here, one entry per anomaly, in source order. The affected text stays
//! in the token stream (as `InvalidString`, `StringEscapeInvalid`, or
//! `Invalid` tokens) so highlighting keeps working past the error.

/// Byte range in the source, end-exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

/// One anomaly found while scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

/// What kind of anomaly occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    /// A character no lexer rule recognizes.
    #[error("invalid character")]
    InvalidCharacter,
    /// A string's closing quote is missing on its line.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// End of input inside a block comment. `depth` counts the levels
    /// still open; the span runs from the outermost `/*` to end of input.
    #[error("unterminated block comment ({depth} open)")]
    UnterminatedComment { depth: u32 },
    /// A backslash escape inside a string. Glossa defines none, so every
    /// escape is an error.
    #[error("invalid escape sequence `\\{escape}`")]
    InvalidEscape { escape: char },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::DiagnosticKind;

    #[test]
    fn display_messages() {
        assert_eq!(
            DiagnosticKind::UnterminatedString.to_string(),
            "unterminated string literal"
        );
        assert_eq!(
            DiagnosticKind::UnterminatedComment { depth: 2 }.to_string(),
            "unterminated block comment (2 open)"
        );
        assert_eq!(
            DiagnosticKind::InvalidEscape { escape: 'n' }.to_string(),
            "invalid escape sequence `\\n`"
        );
    }
}
