//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content, so
//! the scanner detects end of input without explicit bounds checks. Total
//! buffer size is rounded up to the next 64-byte boundary, which also gives
//! `peek()` safe padding to read near the end of the buffer.
//!
//! During construction the buffer scans for encoding issues (a UTF-8 byte
//! order mark, interior null bytes) and records them; the editor shell decides
//! how to surface those. Interior nulls are otherwise harmless: the cursor
//! distinguishes them from the sentinel by position.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated copy of one editor buffer's content.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Encoding issues detected during construction.
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected while building the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    /// Byte position of the problematic sequence.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue.
///
/// The buffer is built from `&str`, so only valid UTF-8 reaches it: UTF-16
/// BOMs (`0xFF 0xFE` / `0xFE 0xFF`) fail upstream at decode time and are
/// not represented here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`0xEF 0xBB 0xBF`, U+FEFF) at the start of the buffer.
    Utf8Bom,
    /// Null byte (U+0000) inside the source content.
    InteriorNull,
}

impl SourceBuffer {
    /// Copy `source` into a cache-line-padded buffer with a `0x00` sentinel
    /// appended, recording any encoding issues found along the way.
    ///
    /// Sources larger than `u32::MAX` bytes saturate `source_len`; an editor
    /// buffer never gets anywhere near that.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to the next 64-byte boundary (minimum: source + sentinel).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Zero-filled allocation: the sentinel and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let mut encoding_issues = Vec::new();
        detect_bom(source_bytes, &mut encoding_issues);
        detect_interior_nulls(source_bytes, &mut encoding_issues);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// The source bytes, without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Encoding issues detected during construction.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }

    /// Extract a source substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source content and on UTF-8
    /// character boundaries. Both hold for spans produced by the scanner,
    /// since the buffer was built from a `&str` and the scanner only splits
    /// at character boundaries.
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on content originally validated as &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &str {
        debug_assert!(end <= self.source_len, "slice end past source length");
        debug_assert!(start <= end, "slice start past end");
        // SAFETY: the buffer content up to source_len came from a valid
        // &str, and scanner spans fall on character boundaries within it.
        unsafe { std::str::from_utf8_unchecked(&self.buf[start as usize..end as usize]) }
    }
}

/// Detect a UTF-8 byte order mark at the start of the source.
fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf8Bom,
            pos: 0,
            len: 3,
        });
    }
}

/// Detect null bytes (U+0000) within the source content.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let mut offset = 0;
    while let Some(pos) = memchr::memchr(0, &source[offset..]) {
        let absolute = offset + pos;
        if let Ok(p) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos: p,
                len: 1,
            });
        }
        offset = absolute + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source() {
        let buf = SourceBuffer::new("");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
        assert!(buf.encoding_issues().is_empty());
    }

    #[test]
    fn greek_source_round_trips() {
        let source = "ΠΡΟΓΡΑΜΜΑ Άσκηση\nΑΡΧΗ\n";
        let buf = SourceBuffer::new(source);
        assert_eq!(buf.len() as usize, source.len());
        assert_eq!(buf.as_bytes(), source.as_bytes());
        assert!(buf.encoding_issues().is_empty());
    }

    #[test]
    fn buffer_is_padded_to_cache_line() {
        for len in [0, 1, 10, 63, 64, 65, 127, 128, 1000] {
            let source: String = "x".repeat(len);
            let buf = SourceBuffer::new(&source);
            let cursor = buf.cursor();
            assert_eq!(cursor.pos(), 0);
            // Everything past the content is sentinel/padding zeros.
            assert_eq!(buf.as_bytes().len(), len);
        }
    }

    #[test]
    fn slice_extracts_substring() {
        let buf = SourceBuffer::new("γράψε \"ok\"");
        assert_eq!(buf.slice(0, "γράψε".len() as u32), "γράψε");
    }

    #[test]
    fn detects_utf8_bom() {
        let buf = SourceBuffer::new("\u{FEFF}αρχη");
        assert_eq!(buf.encoding_issues().len(), 1);
        assert_eq!(buf.encoding_issues()[0].kind, EncodingIssueKind::Utf8Bom);
        assert_eq!(buf.encoding_issues()[0].len, 3);
    }

    #[test]
    fn feff_past_the_start_is_not_a_bom() {
        let buf = SourceBuffer::new("αν\u{FEFF}χ");
        assert!(buf.encoding_issues().is_empty());
    }

    #[test]
    fn detects_interior_nulls() {
        let buf = SourceBuffer::new("αν\0χ\0");
        let nulls: Vec<_> = buf
            .encoding_issues()
            .iter()
            .filter(|i| i.kind == EncodingIssueKind::InteriorNull)
            .collect();
        assert_eq!(nulls.len(), 2);
        assert_eq!(nulls[0].pos, 4); // "αν" is 4 bytes
    }

    #[test]
    fn cursor_on_empty_source_is_eof() {
        let buf = SourceBuffer::new("");
        let cursor = buf.cursor();
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
    }
}
