//! Byte cursor over a sentinel-terminated buffer.
//!
//! The cursor advances byte by byte. End of input is detected when the
//! current byte equals the sentinel (`0x00`) and the position has reached
//! the source length; a null byte before that is an interior null, not EOF.
//!
//! The cursor is [`Copy`], so the scanner can take a cheap snapshot for
//! lookahead (used by the unterminated-string check, which must inspect the
//! rest of the line without consuming it).

/// Returns the earliest (minimum) of two optional positions.
///
/// Combines results from separate memchr calls when more needles are needed
/// than `memchr3` supports.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Byte cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf[source_len] == 0x00`, and all bytes after it are `0x00` padding.
/// Guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// The byte at the current position. Returns `0x00` at EOF (the
    /// sentinel); interior nulls also return `0x00` — use
    /// [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// The byte one position ahead. Safe at any position thanks to the
    /// sentinel and padding.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` once the cursor has consumed all source content.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel terminates the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// ASCII, continuation, and invalid leading bytes all count as 1.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character, using the current byte as the
    /// leading byte.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance to the next `\n` byte or EOF.
    ///
    /// Used for line comments and unterminated-string recovery. Scans only
    /// within source content; if no newline is found, the cursor lands on
    /// the EOF sentinel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past ordinary string content to the next interesting byte
    /// for a string delimited by `quote`. Returns that byte, or 0 at EOF.
    ///
    /// Interesting bytes: the active quote, `\`, `\n`, `\r`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        // \r must also stop the scan: strings never span lines.
        let cr = memchr::memchr(b'\r', remaining);

        if let Some(off) = earliest_of(primary, cr) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance past ordinary block-comment content to the next delimiter
    /// byte (`*`, `!`, or `/`). Returns that byte, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_comment_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr3(b'*', b'!', b'/', remaining) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::SourceBuffer;

    #[test]
    fn current_and_advance() {
        let buf = SourceBuffer::new("αν");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.current(), 0xCE); // first byte of 'α'
        cursor.advance_char();
        assert_eq!(cursor.pos(), 2);
        cursor.advance_char();
        assert!(cursor.is_eof());
    }

    #[test]
    fn peek_returns_next_byte() {
        let buf = SourceBuffer::new("ab");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), b'b');
    }

    #[test]
    fn peek_at_end_returns_sentinel() {
        let buf = SourceBuffer::new("x");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), 0);
    }

    #[test]
    fn interior_null_is_not_eof() {
        let buf = SourceBuffer::new("a\0b");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof());
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn eat_while_stops_at_sentinel() {
        let buf = SourceBuffer::new("aaa");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_until_newline_finds_lf() {
        let buf = SourceBuffer::new("! σχόλιο\nεπόμενη");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.current(), b'\n');
    }

    #[test]
    fn eat_until_newline_stops_at_eof() {
        let buf = SourceBuffer::new("χωρίς αλλαγή γραμμής");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_string_delim_finds_quote() {
        let buf = SourceBuffer::new("μήνυμα\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos() as usize, "μήνυμα".len());
    }

    #[test]
    fn skip_to_string_delim_honors_active_quote() {
        // A double quote is plain content inside a single-quoted string.
        let buf = SourceBuffer::new("abc\"def'");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'\'');
        assert_eq!(b, b'\'');
        assert_eq!(cursor.pos(), 7);
    }

    #[test]
    fn skip_to_string_delim_stops_at_backslash() {
        let buf = SourceBuffer::new("ab\\n");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn skip_to_string_delim_stops_at_cr() {
        let buf = SourceBuffer::new("ab\r\ncd");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\r');
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn skip_to_string_delim_eof() {
        let buf = SourceBuffer::new("abc");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_string_delim(b'"'), 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_comment_delim_finds_star() {
        let buf = SourceBuffer::new("σχόλιο */");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_comment_delim();
        assert_eq!(b, b'*');
    }

    #[test]
    fn skip_to_comment_delim_finds_bang() {
        let buf = SourceBuffer::new("ab!cd");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_comment_delim(), b'!');
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn skip_to_comment_delim_eof() {
        let buf = SourceBuffer::new("plain text");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_comment_delim(), 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn cursor_is_copy_for_lookahead() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);
        let saved = cursor;
        cursor.advance_n(3);
        assert_eq!(cursor.pos(), 5);
        assert_eq!(saved.pos(), 2);
        assert_eq!(saved.current(), b'c');
    }
}
