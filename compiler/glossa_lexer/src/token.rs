//! Cooked tokens: the lexer's output vocabulary.

use crate::position::Position;

/// Final classification of a lexeme.
///
/// Error conditions are ordinary kinds (`InvalidString`,
/// `StringEscapeInvalid`, `Invalid`) so a highlighter can style them like
/// any other token; the details live in the accompanying
/// [`ScanDiagnostic`](crate::ScanDiagnostic) list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Structural keyword (`προγραμμα`, `αν`, `για`, ...).
    Keyword,
    /// Type keyword (`ακεραια`, `λογικη`, ...).
    TypeKeyword,
    /// Word-shaped operator (`και`, `η`, `οχι`, `div`, `mod`).
    OperatorKeyword,
    /// Any other word.
    Identifier,
    /// Symbolic operator (`<-`, `<=`, `+`, ...).
    Operator,
    /// Punctuation (`:`, `..`, `,`, `&`).
    Delimiter,
    /// One of `(`, `)`, `[`, `]`.
    Bracket,
    /// Run of decimal digits.
    IntegerLiteral,
    /// Digits, dot, digits.
    FloatLiteral,
    /// Any piece of a well-formed string: opening quote, content, closing
    /// quote. One string literal spans several tokens.
    StringLiteral,
    /// A string with no closing quote on its line, consumed through end of
    /// line.
    InvalidString,
    /// A backslash escape inside a string. Glossa strings define no escape
    /// sequences, so every escape is flagged.
    StringEscapeInvalid,
    /// Line comment (`!`...) or any piece of a block comment.
    Comment,
    /// Run of spaces, tabs, and line breaks.
    Whitespace,
    /// A character no rule recognizes.
    Invalid,
}

impl TokenKind {
    /// Human-readable kind name, used in diagnostics and test output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::TypeKeyword => "type keyword",
            TokenKind::OperatorKeyword => "operator keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Bracket => "bracket",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::InvalidString => "unterminated string",
            TokenKind::StringEscapeInvalid => "invalid string escape",
            TokenKind::Comment => "comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Invalid => "invalid character",
        }
    }

    /// Whitespace and comments: ignorable to anything but a highlighter.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

/// One cooked token. The lexeme borrows from the
/// [`SourceBuffer`](glossa_lexer_core::SourceBuffer) the session was built
/// over, so concatenating lexemes reproduces the source exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The token's text, exactly as typed (never normalized).
    pub lexeme: &'a str,
    /// Position of the first character.
    pub start: Position,
    /// Position one past the last character.
    pub end: Position,
}

#[cfg(test)]
mod tests {
    use super::TokenKind;

    #[test]
    fn trivia_kinds() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
        assert!(!TokenKind::InvalidString.is_trivia());
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(TokenKind::OperatorKeyword.name(), "operator keyword");
        assert_eq!(TokenKind::Invalid.name(), "invalid character");
    }
}
