//! The raw scanner: a total, single-pass state machine over source bytes.
//!
//! The scanner never fails. Every byte of input is covered by exactly one
//! [`RawToken`], so concatenating the token lengths reproduces the source
//! length exactly. Malformed input is reported through dedicated tags
//! ([`RawTag::Invalid`], [`RawTag::InvalidString`]) rather than errors.
//!
//! A stack of [`State`]s drives dispatch. The stack starts as `[Root]` and
//! the root entry is never popped; block comments push one [`State::BlockComment`]
//! per `/*` so nesting depth is simply the number of comment entries.
//!
//! Rule order within a state is fixed: the first rule whose start matches
//! wins, even when a later rule could consume more input. This is why `!`
//! starts a line comment before any identifier or operator interpretation
//! is considered, and why `/*` opens a comment before `/` joins an
//! operator run.

use crate::cursor::Cursor;
use crate::source_buffer::SourceBuffer;
use crate::tag::{RawTag, RawToken, State};

/// Whitespace bytes recognized at root: space, tab, carriage return, newline.
#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Bytes that continue a word run: ASCII alphanumerics, underscore, dollar
/// sign, and every byte of a multi-byte UTF-8 sequence.
///
/// Treating all bytes `>= 0x80` as word content keeps Greek (and any other
/// non-ASCII) identifiers intact without decoding; it also means a stray
/// byte can only become an [`RawTag::Invalid`] token when it is ASCII.
#[inline]
fn is_word_byte(byte: u8) -> bool {
    byte >= 0x80 || byte == b'_' || byte == b'$' || byte.is_ascii_alphanumeric()
}

/// Bytes that form operator and delimiter runs.
#[inline]
fn is_op_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'=' | b'>' | b'<' | b':' | b'.' | b',' | b'&' | b'+' | b'-' | b'*' | b'/' | b'^'
    )
}

/// Total scanner over a [`SourceBuffer`].
///
/// Call [`next_token()`](Self::next_token) until it returns
/// [`RawTag::Eof`]; after that it returns `Eof` forever. Offsets are not
/// tracked here: callers accumulate token lengths.
#[derive(Debug)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    /// Lexer state stack. Starts as `[Root]`; the root entry is never
    /// popped.
    stack: Vec<State>,
    /// Byte offset of each currently-open `/*`, outermost first.
    comment_opens: Vec<u32>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `buffer`.
    pub fn new(buffer: &'a SourceBuffer) -> Self {
        Self {
            cursor: buffer.cursor(),
            stack: vec![State::Root],
            comment_opens: Vec::new(),
        }
    }

    /// The state currently on top of the stack.
    pub fn state(&self) -> State {
        self.stack.last().copied().unwrap_or(State::Root)
    }

    /// Number of block comments currently open.
    ///
    /// Nonzero after the final token means the input ended inside a
    /// comment.
    pub fn comment_depth(&self) -> u32 {
        u32::try_from(self.comment_opens.len()).unwrap_or(u32::MAX)
    }

    /// Byte offset of the outermost unclosed `/*`, if any.
    pub fn first_unclosed_comment(&self) -> Option<u32> {
        self.comment_opens.first().copied()
    }

    /// Produce the next raw token.
    ///
    /// Total: always returns a token, with [`RawTag::Eof`] (length 0) once
    /// the input is exhausted. All other tokens have length >= 1.
    pub fn next_token(&mut self) -> RawToken {
        loop {
            if self.cursor.is_eof() {
                // State is left intact so unterminated-comment depth
                // remains observable after the last token.
                return RawToken {
                    tag: RawTag::Eof,
                    len: 0,
                };
            }
            let token = match self.state() {
                State::Root => Some(self.next_root()),
                State::BlockComment => Some(self.next_comment()),
                State::DoubleQuotedString => self.next_string(b'"'),
                State::SingleQuotedString => self.next_string(b'\''),
            };
            if let Some(token) = token {
                return token;
            }
            // A string state was popped without producing a token;
            // re-dispatch from the new top of the stack.
        }
    }

    fn next_root(&mut self) -> RawToken {
        let start = self.cursor.pos();
        let tag = match self.cursor.current() {
            b' ' | b'\t' | b'\r' | b'\n' => {
                self.cursor.eat_while(is_whitespace);
                RawTag::Whitespace
            }
            b'!' => {
                self.cursor.eat_until_newline_or_eof();
                RawTag::LineComment
            }
            b'/' if self.cursor.peek() == b'*' => {
                self.cursor.advance_n(2);
                self.stack.push(State::BlockComment);
                self.comment_opens.push(start);
                RawTag::BlockCommentOpen
            }
            quote @ (b'"' | b'\'') => return self.string_start(quote, start),
            b'_' | b'$' | b'A'..=b'Z' | b'a'..=b'z' | 0x80..=0xFF => {
                self.cursor.eat_while(is_word_byte);
                RawTag::Word
            }
            b'0'..=b'9' => self.scan_number(),
            b'(' => {
                self.cursor.advance();
                RawTag::LeftParen
            }
            b')' => {
                self.cursor.advance();
                RawTag::RightParen
            }
            b'[' => {
                self.cursor.advance();
                RawTag::LeftBracket
            }
            b']' => {
                self.cursor.advance();
                RawTag::RightBracket
            }
            byte if is_op_byte(byte) => {
                self.cursor.eat_while(is_op_byte);
                RawTag::OpRun
            }
            _ => {
                // Unrecognized ASCII byte (or interior null). One byte,
                // then resume normally.
                self.cursor.advance();
                RawTag::Invalid
            }
        };
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    /// Digits, then a fractional part only when a digit follows the dot.
    ///
    /// `3.` is an integer followed by an operator run, and `.14` is an
    /// operator run followed by an integer; only `3.14` forms a float.
    fn scan_number(&mut self) -> RawTag {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
            RawTag::Float
        } else {
            RawTag::Int
        }
    }

    /// Handle a quote at root.
    ///
    /// Strings never span lines, so the rest of the line is checked for a
    /// closing quote before committing to the string state. When no close
    /// exists the whole remainder of the line becomes one
    /// [`RawTag::InvalidString`] token and no state is pushed, keeping
    /// recovery local to the line.
    fn string_start(&mut self, quote: u8, start: u32) -> RawToken {
        if self.line_has_closing_quote(quote) {
            self.cursor.advance();
            self.stack.push(if quote == b'"' {
                State::DoubleQuotedString
            } else {
                State::SingleQuotedString
            });
            RawToken {
                tag: RawTag::StringOpen,
                len: 1,
            }
        } else {
            self.cursor.advance();
            self.cursor.eat_until_newline_or_eof();
            RawToken {
                tag: RawTag::InvalidString,
                len: self.cursor.pos() - start,
            }
        }
    }

    /// Lookahead: does the current line close the string opened by the
    /// quote under the cursor? Escaped characters (including escaped
    /// quotes) are skipped; a backslash at end of line leaves the string
    /// open.
    fn line_has_closing_quote(&self, quote: u8) -> bool {
        let mut look = self.cursor;
        look.advance(); // past the opening quote
        loop {
            match look.skip_to_string_delim(quote) {
                0 | b'\n' | b'\r' => return false,
                b'\\' => {
                    look.advance();
                    match look.current() {
                        b'\n' | b'\r' => return false,
                        0 if look.is_eof() => return false,
                        _ => look.advance_char(),
                    }
                }
                // The only remaining stop byte is the active quote.
                _ => return true,
            }
        }
    }

    /// One step inside a string. `None` means the state was popped without
    /// consuming input (line ended unexpectedly) and dispatch must restart.
    fn next_string(&mut self, quote: u8) -> Option<RawToken> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            byte if byte == quote => {
                self.cursor.advance();
                self.stack.pop();
                Some(RawToken {
                    tag: RawTag::StringClose,
                    len: 1,
                })
            }
            b'\\' => {
                self.cursor.advance();
                match self.cursor.current() {
                    b'\n' | b'\r' => {}
                    0 if self.cursor.is_eof() => {}
                    _ => self.cursor.advance_char(),
                }
                Some(RawToken {
                    tag: RawTag::StringEscape,
                    len: self.cursor.pos() - start,
                })
            }
            b'\n' | b'\r' => {
                // Unreachable when entered through string_start, which
                // verified the close; kept so a bad state can never loop.
                self.stack.pop();
                None
            }
            0 if self.cursor.is_eof() => {
                self.stack.pop();
                None
            }
            _ => {
                self.cursor.skip_to_string_delim(quote);
                debug_assert!(self.cursor.pos() > start, "content run must make progress");
                Some(RawToken {
                    tag: RawTag::StringText,
                    len: self.cursor.pos() - start,
                })
            }
        }
    }

    /// One step inside a block comment.
    ///
    /// `/*` nests (pushes another comment state) and `*/` closes one
    /// level. Lone `*`, `!`, and `/` bytes are single-byte content tokens;
    /// everything else is swallowed in bulk.
    fn next_comment(&mut self) -> RawToken {
        let start = self.cursor.pos();
        let tag = match self.cursor.current() {
            b'/' if self.cursor.peek() == b'*' => {
                self.cursor.advance_n(2);
                self.stack.push(State::BlockComment);
                self.comment_opens.push(start);
                RawTag::BlockCommentOpen
            }
            b'*' if self.cursor.peek() == b'/' => {
                self.cursor.advance_n(2);
                self.stack.pop();
                self.comment_opens.pop();
                RawTag::BlockCommentClose
            }
            b'*' | b'!' | b'/' => {
                self.cursor.advance();
                RawTag::BlockCommentText
            }
            _ => {
                self.cursor.skip_to_comment_delim();
                RawTag::BlockCommentText
            }
        };
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
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

    use super::*;

    /// Scan everything, asserting totality along the way.
    fn scan_all(source: &str) -> Vec<(RawTag, u32)> {
        let buffer = SourceBuffer::new(source);
        let mut scanner = Scanner::new(&buffer);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token();
            if token.tag == RawTag::Eof {
                assert_eq!(token.len, 0);
                break;
            }
            assert!(token.len >= 1, "non-eof token must consume input");
            tokens.push((token.tag, token.len));
        }
        let total: u32 = tokens.iter().map(|&(_, len)| len).sum();
        assert_eq!(total as usize, source.len(), "token lengths must cover the source");
        tokens
    }

    fn tags(source: &str) -> Vec<RawTag> {
        scan_all(source).into_iter().map(|(tag, _)| tag).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(tags(""), vec![]);
    }

    #[test]
    fn greek_word_is_one_token() {
        let tokens = scan_all("πρόγραμμα");
        assert_eq!(tokens, vec![(RawTag::Word, 18)]);
    }

    #[test]
    fn words_and_whitespace_alternate() {
        assert_eq!(
            tags("αν χ τότε"),
            vec![
                RawTag::Word,
                RawTag::Whitespace,
                RawTag::Word,
                RawTag::Whitespace,
                RawTag::Word,
            ]
        );
    }

    #[test]
    fn word_may_contain_digits_and_underscore() {
        assert_eq!(tags("τελος_προγραμματος χ2"), vec![
            RawTag::Word,
            RawTag::Whitespace,
            RawTag::Word,
        ]);
    }

    #[test]
    fn dollar_is_a_word_byte() {
        assert_eq!(tags("$x"), vec![RawTag::Word]);
        assert_eq!(scan_all("χ$2"), vec![(RawTag::Word, 4)]);
    }

    #[test]
    fn word_may_not_start_with_digit() {
        // Digits first: number, then the word.
        assert_eq!(tags("2χ"), vec![RawTag::Int, RawTag::Word]);
    }

    #[test]
    fn integer_and_float() {
        assert_eq!(tags("42"), vec![RawTag::Int]);
        assert_eq!(tags("3.14"), vec![RawTag::Float]);
    }

    #[test]
    fn trailing_dot_is_not_a_float() {
        assert_eq!(tags("3."), vec![RawTag::Int, RawTag::OpRun]);
    }

    #[test]
    fn leading_dot_is_not_a_float() {
        assert_eq!(tags(".14"), vec![RawTag::OpRun, RawTag::Int]);
    }

    #[test]
    fn range_between_integers() {
        // "1..5": Int, OpRun "..", Int.
        assert_eq!(
            scan_all("1..5"),
            vec![(RawTag::Int, 1), (RawTag::OpRun, 2), (RawTag::Int, 1)]
        );
    }

    #[test]
    fn assignment_arrow_is_one_run() {
        assert_eq!(scan_all("<-"), vec![(RawTag::OpRun, 2)]);
    }

    #[test]
    fn brackets_are_individual_tokens() {
        assert_eq!(
            tags("([])"),
            vec![
                RawTag::LeftParen,
                RawTag::LeftBracket,
                RawTag::RightBracket,
                RawTag::RightParen,
            ]
        );
    }

    #[test]
    fn line_comment_runs_to_newline() {
        let tokens = scan_all("! σχόλιο\nχ");
        assert_eq!(tokens[0].0, RawTag::LineComment);
        assert_eq!(tokens[1], (RawTag::Whitespace, 1));
        assert_eq!(tokens[2].0, RawTag::Word);
    }

    #[test]
    fn line_comment_at_eof() {
        assert_eq!(tags("! χωρίς newline"), vec![RawTag::LineComment]);
    }

    #[test]
    fn bang_wins_over_identifier_start() {
        // '!' immediately before a word still starts a comment.
        assert_eq!(tags("!ok"), vec![RawTag::LineComment]);
    }

    #[test]
    fn block_comment_simple() {
        assert_eq!(
            tags("/* σχόλιο */"),
            vec![
                RawTag::BlockCommentOpen,
                RawTag::BlockCommentText,
                RawTag::BlockCommentClose,
            ]
        );
    }

    #[test]
    fn block_comment_nests() {
        let tokens = tags("/* a /* b */ c */x");
        let opens = tokens
            .iter()
            .filter(|&&t| t == RawTag::BlockCommentOpen)
            .count();
        let closes = tokens
            .iter()
            .filter(|&&t| t == RawTag::BlockCommentClose)
            .count();
        assert_eq!(opens, 2);
        assert_eq!(closes, 2);
        assert_eq!(*tokens.last().unwrap(), RawTag::Word);
    }

    #[test]
    fn unterminated_comment_reports_depth() {
        let buffer = SourceBuffer::new("/* έξω /* μέσα");
        let mut scanner = Scanner::new(&buffer);
        while scanner.next_token().tag != RawTag::Eof {}
        assert_eq!(scanner.comment_depth(), 2);
        assert_eq!(scanner.first_unclosed_comment(), Some(0));
    }

    #[test]
    fn closed_comment_restores_root() {
        let buffer = SourceBuffer::new("/* x */");
        let mut scanner = Scanner::new(&buffer);
        while scanner.next_token().tag != RawTag::Eof {}
        assert_eq!(scanner.comment_depth(), 0);
        assert_eq!(scanner.state(), State::Root);
        assert_eq!(scanner.first_unclosed_comment(), None);
    }

    #[test]
    fn lone_star_inside_comment_is_content() {
        // The '*' not followed by '/' must not end the comment.
        assert_eq!(
            tags("/* a * b */"),
            vec![
                RawTag::BlockCommentOpen,
                RawTag::BlockCommentText,
                RawTag::BlockCommentText,
                RawTag::BlockCommentText,
                RawTag::BlockCommentClose,
            ]
        );
    }

    #[test]
    fn slash_inside_comment_does_not_break_nesting() {
        // A lone '/' is content; the following "*/" still closes.
        assert_eq!(tags("/* a / b */").last(), Some(&RawTag::BlockCommentClose));
    }

    #[test]
    fn newlines_are_comment_content() {
        let tokens = scan_all("/* γραμμή 1\nγραμμή 2 */");
        assert_eq!(tokens.last().unwrap().0, RawTag::BlockCommentClose);
    }

    #[test]
    fn double_quoted_string() {
        assert_eq!(
            tags("\"γεια\""),
            vec![RawTag::StringOpen, RawTag::StringText, RawTag::StringClose]
        );
    }

    #[test]
    fn single_quoted_string() {
        assert_eq!(
            tags("'a\"b'"),
            vec![RawTag::StringOpen, RawTag::StringText, RawTag::StringClose]
        );
    }

    #[test]
    fn empty_string() {
        assert_eq!(tags("\"\""), vec![RawTag::StringOpen, RawTag::StringClose]);
    }

    #[test]
    fn escape_inside_string() {
        assert_eq!(
            scan_all("\"a\\nb\""),
            vec![
                (RawTag::StringOpen, 1),
                (RawTag::StringText, 1),
                (RawTag::StringEscape, 2),
                (RawTag::StringText, 1),
                (RawTag::StringClose, 1),
            ]
        );
    }

    #[test]
    fn escaped_quote_does_not_close() {
        assert_eq!(
            tags("\"a\\\"b\""),
            vec![
                RawTag::StringOpen,
                RawTag::StringText,
                RawTag::StringEscape,
                RawTag::StringText,
                RawTag::StringClose,
            ]
        );
    }

    #[test]
    fn escape_of_multibyte_char_spans_its_bytes() {
        // Backslash plus a two-byte Greek letter: 3 bytes total.
        assert_eq!(
            scan_all("\"\\α\""),
            vec![
                (RawTag::StringOpen, 1),
                (RawTag::StringEscape, 3),
                (RawTag::StringClose, 1),
            ]
        );
    }

    #[test]
    fn unterminated_string_consumes_rest_of_line() {
        let tokens = scan_all("\"abc\nχ");
        assert_eq!(tokens[0], (RawTag::InvalidString, 4));
        assert_eq!(tokens[1], (RawTag::Whitespace, 1));
        assert_eq!(tokens[2].0, RawTag::Word);
    }

    #[test]
    fn unterminated_string_at_eof() {
        assert_eq!(tags("\"abc"), vec![RawTag::InvalidString]);
    }

    #[test]
    fn backslash_at_end_of_line_leaves_string_open() {
        // The close-quote check must not treat an escaped newline as a
        // continuation; the whole line is invalid.
        let tokens = scan_all("\"a\\\nβ");
        assert_eq!(tokens[0], (RawTag::InvalidString, 3));
    }

    #[test]
    fn string_lookahead_does_not_cross_lines() {
        // A quote on the next line must not terminate this one.
        let tokens = scan_all("\"abc\n\"ok\"");
        assert_eq!(tokens[0].0, RawTag::InvalidString);
        assert_eq!(tokens[2].0, RawTag::StringOpen);
    }

    #[test]
    fn invalid_ascii_byte_is_one_token() {
        assert_eq!(
            tags("χ @ ψ"),
            vec![
                RawTag::Word,
                RawTag::Whitespace,
                RawTag::Invalid,
                RawTag::Whitespace,
                RawTag::Word,
            ]
        );
    }

    #[test]
    fn interior_null_is_invalid() {
        assert_eq!(tags("a\0b"), vec![RawTag::Word, RawTag::Invalid, RawTag::Word]);
    }

    #[test]
    fn comment_open_wins_over_operator_run() {
        // "/*" at the start of what could be an operator run opens a
        // comment instead.
        assert_eq!(tags("/*-*/")[0], RawTag::BlockCommentOpen);
    }

    #[test]
    fn division_without_star_is_an_operator() {
        assert_eq!(tags("α/β"), vec![RawTag::Word, RawTag::OpRun, RawTag::Word]);
    }

    #[test]
    fn crlf_is_whitespace() {
        assert_eq!(
            scan_all("α\r\nβ"),
            vec![
                (RawTag::Word, 2),
                (RawTag::Whitespace, 2),
                (RawTag::Word, 2),
            ]
        );
    }

    #[test]
    fn full_statement() {
        assert_eq!(
            tags("χ <- 3.14"),
            vec![
                RawTag::Word,
                RawTag::Whitespace,
                RawTag::OpRun,
                RawTag::Whitespace,
                RawTag::Float,
            ]
        );
    }

    mod properties {
        use proptest::prelude::*;

        use super::{RawTag, Scanner, SourceBuffer};

        proptest! {
            /// Any input scans to completion and the token lengths sum to
            /// the exact source length.
            #[test]
            fn scan_is_total_and_lossless(source in ".*") {
                let buffer = SourceBuffer::new(&source);
                let mut scanner = Scanner::new(&buffer);
                let mut total: u64 = 0;
                loop {
                    let token = scanner.next_token();
                    if token.tag == RawTag::Eof {
                        break;
                    }
                    prop_assert!(token.len >= 1);
                    total += u64::from(token.len);
                }
                prop_assert_eq!(total, source.len() as u64);
            }

            /// Scanning the same input twice yields identical tokens.
            #[test]
            fn scan_is_deterministic(source in "[α-ωΑ-Ω a-z0-9<>=.,!/*\"'\\\\\n-]{0,64}") {
                let buffer = SourceBuffer::new(&source);
                let collect = || {
                    let mut scanner = Scanner::new(&buffer);
                    let mut out = Vec::new();
                    loop {
                        let t = scanner.next_token();
                        if t.tag == RawTag::Eof { break; }
                        out.push((t.tag, t.len));
                    }
                    out
                };
                prop_assert_eq!(collect(), collect());
            }
        }
    }
}
