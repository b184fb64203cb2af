//! The lexer session: raw tags in, cooked tokens out.
//!
//! A [`Lexer`] drives one [`Scanner`] over one [`SourceBuffer`], resolving
//! each raw tag to a [`TokenKind`] (keyword lookup for words, exact-string
//! lookup for operator runs), attaching line/column positions, and
//! collecting diagnostics on the side. It never fails: every input
//! produces a token stream whose lexemes concatenate back to the source.

use glossa_lexer_core::{RawTag, Scanner, SourceBuffer};

use crate::classify::{classify_op_run, classify_word};
use crate::diagnostics::{DiagnosticKind, ScanDiagnostic, Span};
use crate::position::PositionTracker;
use crate::token::{Token, TokenKind};

/// Everything one full scan produces.
#[derive(Debug)]
pub struct ScanResult<'a> {
    /// All tokens in source order, whitespace and comments included.
    pub tokens: Vec<Token<'a>>,
    /// All anomalies in source order (end-of-input conditions last).
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Pull-based lexer session over one document.
///
/// Use as an iterator, or call [`scan`] for the eager form. Diagnostics
/// accumulate as tokens are pulled; the unterminated-comment check runs
/// when the stream ends, so drain the session before reading them.
#[derive(Debug)]
pub struct Lexer<'a> {
    buffer: &'a SourceBuffer,
    scanner: Scanner<'a>,
    tracker: PositionTracker,
    offset: u32,
    diagnostics: Vec<ScanDiagnostic>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(buffer: &'a SourceBuffer) -> Self {
        Self {
            buffer,
            scanner: Scanner::new(buffer),
            tracker: PositionTracker::new(),
            offset: 0,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let raw = self.scanner.next_token();
        if raw.tag == RawTag::Eof {
            self.finish();
            return None;
        }

        let span = Span {
            start: self.offset,
            end: self.offset + raw.len,
        };
        self.offset = span.end;
        let lexeme = self.buffer.slice(span.start, span.end);
        let (start, end) = self.tracker.advance(lexeme);
        let kind = self.cook(raw.tag, lexeme, span);

        Some(Token {
            kind,
            lexeme,
            start,
            end,
        })
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }

    /// Consume the session, yielding the collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<ScanDiagnostic> {
        self.diagnostics
    }

    /// Resolve a raw tag to its final kind, recording diagnostics for the
    /// error tags.
    fn cook(&mut self, tag: RawTag, lexeme: &str, span: Span) -> TokenKind {
        match tag {
            RawTag::Word => classify_word(lexeme),
            RawTag::Int => TokenKind::IntegerLiteral,
            RawTag::Float => TokenKind::FloatLiteral,
            RawTag::StringOpen | RawTag::StringText | RawTag::StringClose => {
                TokenKind::StringLiteral
            }
            RawTag::StringEscape => {
                let escape = lexeme.chars().nth(1).unwrap_or('\\');
                self.diagnostics.push(ScanDiagnostic {
                    kind: DiagnosticKind::InvalidEscape { escape },
                    span,
                });
                TokenKind::StringEscapeInvalid
            }
            RawTag::InvalidString => {
                self.diagnostics.push(ScanDiagnostic {
                    kind: DiagnosticKind::UnterminatedString,
                    span,
                });
                TokenKind::InvalidString
            }
            RawTag::LineComment
            | RawTag::BlockCommentOpen
            | RawTag::BlockCommentText
            | RawTag::BlockCommentClose => TokenKind::Comment,
            RawTag::LeftParen
            | RawTag::RightParen
            | RawTag::LeftBracket
            | RawTag::RightBracket => TokenKind::Bracket,
            RawTag::OpRun => classify_op_run(lexeme),
            RawTag::Whitespace => TokenKind::Whitespace,
            RawTag::Invalid => {
                self.diagnostics.push(ScanDiagnostic {
                    kind: DiagnosticKind::InvalidCharacter,
                    span,
                });
                TokenKind::Invalid
            }
            // next_token returns before cooking Eof.
            RawTag::Eof => TokenKind::Whitespace,
        }
    }

    /// Record end-of-input conditions, once.
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let depth = self.scanner.comment_depth();
        if depth > 0 {
            let start = self.scanner.first_unclosed_comment().unwrap_or(0);
            self.diagnostics.push(ScanDiagnostic {
                kind: DiagnosticKind::UnterminatedComment { depth },
                span: Span {
                    start,
                    end: self.buffer.len(),
                },
            });
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.next_token()
    }
}

/// Scan a whole document eagerly.
pub fn scan(buffer: &SourceBuffer) -> ScanResult<'_> {
    let mut lexer = Lexer::new(buffer);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tracing::debug!(
        bytes = buffer.len(),
        tokens = tokens.len(),
        diagnostics = lexer.diagnostics().len(),
        "document scanned"
    );
    ScanResult {
        tokens,
        diagnostics: lexer.into_diagnostics(),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{scan, Lexer, SourceBuffer};
    use crate::diagnostics::DiagnosticKind;
    use crate::token::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let buffer = SourceBuffer::new(source);
        scan(&buffer).tokens.iter().map(|t| t.kind).collect()
    }

    fn kinds_no_trivia(source: &str) -> Vec<TokenKind> {
        let buffer = SourceBuffer::new(source);
        scan(&buffer)
            .tokens
            .iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn lexemes_concatenate_to_source() {
        let source = "ΓΡΑΨΕ \"Εμβαδόν: \", ε  ! εμφάνιση\n/*σχ*/ αν χ >= 3.14 τότε";
        let buffer = SourceBuffer::new(source);
        let rebuilt: String = scan(&buffer).tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn scanning_twice_gives_identical_streams() {
        let source = "για ι από 1 μέχρι 10 με_βήμα 2";
        let buffer = SourceBuffer::new(source);
        let first = scan(&buffer);
        let second = scan(&buffer);
        assert_eq!(first.tokens, second.tokens);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn accented_and_plain_spellings_classify_identically() {
        assert_eq!(
            kinds("τέλος_προγράμματος"),
            kinds("τελος_προγραμματος")
        );
        assert_eq!(kinds("ΤΈΛΟΣ_ΠΡΟΓΡΆΜΜΑΤΟΣ"), vec![TokenKind::Keyword]);
    }

    #[test]
    fn keyword_families() {
        assert_eq!(
            kinds_no_trivia("πρόγραμμα ακέραια και χ"),
            vec![
                TokenKind::Keyword,
                TokenKind::TypeKeyword,
                TokenKind::OperatorKeyword,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn dollar_words_are_single_identifiers() {
        assert_eq!(kinds("$x"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("x$2"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn kairos_is_an_identifier() {
        // Starts with the operator keyword "και" but is a whole word.
        assert_eq!(kinds("καιρός"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn assignment_arrow_is_one_operator() {
        let buffer = SourceBuffer::new("χ <- 5");
        let result = scan(&buffer);
        let arrow = &result.tokens[2];
        assert_eq!(arrow.kind, TokenKind::Operator);
        assert_eq!(arrow.lexeme, "<-");
    }

    #[test]
    fn float_dot_boundaries() {
        assert_eq!(kinds("3.14"), vec![TokenKind::FloatLiteral]);
        assert_eq!(
            kinds("3."),
            vec![TokenKind::IntegerLiteral, TokenKind::Operator]
        );
        assert_eq!(
            kinds(".14"),
            vec![TokenKind::Operator, TokenKind::IntegerLiteral]
        );
    }

    #[test]
    fn string_spans_open_text_close() {
        let buffer = SourceBuffer::new("\"γεια\"");
        let result = scan(&buffer);
        assert_eq!(
            result.tokens.iter().map(|t| t.lexeme).collect::<Vec<_>>(),
            vec!["\"", "γεια", "\""]
        );
        assert!(result
            .tokens
            .iter()
            .all(|t| t.kind == TokenKind::StringLiteral));
        assert_eq!(result.diagnostics, vec![]);
    }

    #[test]
    fn escape_in_string_is_flagged_but_consumed() {
        let buffer = SourceBuffer::new("\"a\\nb\"");
        let result = scan(&buffer);
        let escape = result
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::StringEscapeInvalid)
            .expect("escape token");
        assert_eq!(escape.lexeme, "\\n");
        assert_eq!(
            result.diagnostics[0].kind,
            DiagnosticKind::InvalidEscape { escape: 'n' }
        );
        // The literal continues after the escape.
        assert_eq!(result.tokens.last().unwrap().lexeme, "\"");
    }

    #[test]
    fn unterminated_string_recovers_on_next_line() {
        let source = "\"abc\nγράψε";
        let buffer = SourceBuffer::new(source);
        let result = scan(&buffer);
        assert_eq!(result.tokens[0].kind, TokenKind::InvalidString);
        assert_eq!(result.tokens[0].lexeme, "\"abc");
        assert_eq!(result.tokens[2].kind, TokenKind::Keyword);
        assert_eq!(
            result.diagnostics,
            vec![super::ScanDiagnostic {
                kind: DiagnosticKind::UnterminatedString,
                span: super::Span { start: 0, end: 4 },
            }]
        );
    }

    #[test]
    fn backslash_before_line_end_is_one_invalid_string() {
        let buffer = SourceBuffer::new("\"a\\\nβ");
        let result = scan(&buffer);
        assert_eq!(result.tokens[0].kind, TokenKind::InvalidString);
        assert_eq!(result.tokens[0].lexeme, "\"a\\");
    }

    #[test]
    fn nested_comment_closes_back_to_code() {
        let result_kinds = kinds_no_trivia("/* a /* b */ c */ αν");
        assert_eq!(result_kinds.last(), Some(&TokenKind::Keyword));
        let buffer = SourceBuffer::new("/* a /* b */ c */ αν");
        assert_eq!(scan(&buffer).diagnostics, vec![]);
    }

    #[test]
    fn unterminated_comment_reports_depth_and_outermost_span() {
        let source = "αν /* έξω /* μέσα";
        let buffer = SourceBuffer::new(source);
        let result = scan(&buffer);
        assert_eq!(
            result.diagnostics,
            vec![super::ScanDiagnostic {
                kind: DiagnosticKind::UnterminatedComment { depth: 2 },
                span: super::Span {
                    start: 5,
                    end: buffer.len(),
                },
            }]
        );
        // Everything after the opener is still tokenized as comment.
        assert!(result
            .tokens
            .iter()
            .skip(2)
            .all(|t| t.kind == TokenKind::Comment));
    }

    #[test]
    fn unknown_character_is_one_invalid_token() {
        let buffer = SourceBuffer::new("χ @ ψ");
        let result = scan(&buffer);
        assert_eq!(result.tokens[2].kind, TokenKind::Invalid);
        assert_eq!(result.tokens[2].lexeme, "@");
        assert_eq!(
            result.diagnostics[0].kind,
            DiagnosticKind::InvalidCharacter
        );
        assert_eq!(result.tokens[4].kind, TokenKind::Identifier);
    }

    #[test]
    fn positions_track_lines_and_greek_columns() {
        let buffer = SourceBuffer::new("αν χ\nγράψε");
        let result = scan(&buffer);
        let second_word = &result.tokens[2];
        assert_eq!(second_word.lexeme, "χ");
        assert_eq!(second_word.start.line, 1);
        assert_eq!(second_word.start.column, 4);
        let third_word = &result.tokens[4];
        assert_eq!(third_word.lexeme, "γράψε");
        assert_eq!(third_word.start.line, 2);
        assert_eq!(third_word.start.column, 1);
        assert_eq!(third_word.start.offset, 8);
    }

    #[test]
    fn pull_interface_matches_eager_scan() {
        let source = "οσο χ < 10 επανάλαβε";
        let buffer = SourceBuffer::new(source);
        let pulled: Vec<_> = Lexer::new(&buffer).collect();
        assert_eq!(pulled, scan(&buffer).tokens);
    }

    #[test]
    fn empty_input_is_empty_and_clean() {
        let buffer = SourceBuffer::new("");
        let result = scan(&buffer);
        assert_eq!(result.tokens, vec![]);
        assert_eq!(result.diagnostics, vec![]);
    }

    #[test]
    fn full_program_scans_clean() {
        let source = "\
ΠΡΟΓΡΑΜΜΑ Εμβαδόν_Κύκλου
ΣΤΑΘΕΡΕΣ
  ΠΙ = 3.14
ΜΕΤΑΒΛΗΤΕΣ
  ΠΡΑΓΜΑΤΙΚΕΣ: ακτίνα, εμβαδόν
ΑΡΧΗ
  ΔΙΑΒΑΣΕ ακτίνα
  ΑΝ ακτίνα > 0 ΚΑΙ ακτίνα <= 100 ΤΟΤΕ
    εμβαδόν <- ΠΙ * ακτίνα ^ 2
    ΓΡΑΨΕ \"Εμβαδόν: \", εμβαδόν
  ΑΛΛΙΩΣ
    ΓΡΑΨΕ \"Μη έγκυρη ακτίνα\"  ! εκτός ορίων
  ΤΕΛΟΣ_ΑΝ
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
";
        let buffer = SourceBuffer::new(source);
        let result = scan(&buffer);
        assert_eq!(result.diagnostics, vec![]);

        let rebuilt: String = result.tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(rebuilt, source);

        let keyword_count = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Keyword)
            .count();
        // ΠΡΟΓΡΑΜΜΑ ΣΤΑΘΕΡΕΣ ΜΕΤΑΒΛΗΤΕΣ ΑΡΧΗ ΔΙΑΒΑΣΕ ΑΝ ΤΟΤΕ ΓΡΑΨΕ
        // ΑΛΛΙΩΣ ΓΡΑΨΕ ΤΕΛΟΣ_ΑΝ ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
        assert_eq!(keyword_count, 12);
        assert!(result
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::TypeKeyword && t.lexeme == "ΠΡΑΓΜΑΤΙΚΕΣ"));
        assert!(result
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::OperatorKeyword && t.lexeme == "ΚΑΙ"));
    }
}
