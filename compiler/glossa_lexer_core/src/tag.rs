//! Raw token tags and scanner states.
//!
//! The raw scanner classifies bytes only; it does not resolve keywords or
//! distinguish operators from delimiters. Those decisions need the lexeme
//! text (and, for words, accent/case normalization), so they live in the
//! assembly layer (`glossa_lexer`). Error conditions are encoded as tags,
//! never as `Result::Err`.

/// Raw classification of a lexeme, produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    /// Identifier or keyword candidate: letters, `_`, `$`, digits (after
    /// the first character), and any non-ASCII character. The assembly layer
    /// decides between identifier, keyword, type keyword, and operator
    /// keyword after normalization.
    Word,
    /// Run of decimal digits.
    Int,
    /// Decimal digits, a dot, and at least one more digit.
    Float,

    /// Opening quote of a string that closes on the same line.
    StringOpen,
    /// Ordinary string content between delimiters.
    StringText,
    /// Backslash plus one character inside a string. Glossa defines no
    /// escape sequences, so the assembly layer flags these.
    StringEscape,
    /// Closing quote of a string.
    StringClose,
    /// A quote with no matching close before end of line; the whole rest of
    /// the line is consumed so the broken string cannot swallow the document.
    InvalidString,

    /// `!` through end of line.
    LineComment,
    /// `/*` — pushes one block-comment level.
    BlockCommentOpen,
    /// Ordinary block-comment content.
    BlockCommentText,
    /// `*/` — pops one block-comment level.
    BlockCommentClose,

    /// One of `(`, `)`, `[`, `]`.
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    /// Maximal run over `= > < : . , & + - * / ^`. The assembly layer
    /// classifies the run as operator or delimiter by exact string lookup.
    OpRun,

    /// Run of space, tab, carriage return, and line feed bytes.
    Whitespace,

    /// Single byte no rule matched (includes interior null bytes).
    Invalid,

    /// End of input. Always `len == 0`.
    Eof,
}

impl RawTag {
    /// Human-readable description, used in diagnostics and test output.
    pub fn name(self) -> &'static str {
        match self {
            RawTag::Word => "word",
            RawTag::Int => "integer literal",
            RawTag::Float => "float literal",
            RawTag::StringOpen => "string opening quote",
            RawTag::StringText => "string content",
            RawTag::StringEscape => "string escape",
            RawTag::StringClose => "string closing quote",
            RawTag::InvalidString => "unterminated string",
            RawTag::LineComment => "line comment",
            RawTag::BlockCommentOpen => "`/*`",
            RawTag::BlockCommentText => "comment content",
            RawTag::BlockCommentClose => "`*/`",
            RawTag::LeftParen => "`(`",
            RawTag::RightParen => "`)`",
            RawTag::LeftBracket => "`[`",
            RawTag::RightBracket => "`]`",
            RawTag::OpRun => "operator",
            RawTag::Whitespace => "whitespace",
            RawTag::Invalid => "invalid character",
            RawTag::Eof => "end of input",
        }
    }
}

/// A raw token: tag plus byte length. Positions are derived by the consumer,
/// which tracks the running offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

/// Scanner mode. `BlockComment` is re-enterable: each nested `/*` pushes
/// another `BlockComment` entry and each `*/` pops one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Root,
    BlockComment,
    DoubleQuotedString,
    SingleQuotedString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_one_byte() {
        assert_eq!(std::mem::size_of::<RawTag>(), 1);
    }

    #[test]
    fn name_returns_readable_description() {
        assert_eq!(RawTag::Word.name(), "word");
        assert_eq!(RawTag::Int.name(), "integer literal");
        assert_eq!(RawTag::Float.name(), "float literal");
        assert_eq!(RawTag::BlockCommentOpen.name(), "`/*`");
        assert_eq!(RawTag::InvalidString.name(), "unterminated string");
        assert_eq!(RawTag::Eof.name(), "end of input");
    }

    #[test]
    fn raw_token_is_copy() {
        let tok = RawToken {
            tag: RawTag::OpRun,
            len: 2,
        };
        let tok2 = tok;
        assert_eq!(tok, tok2);
    }
}
