//! Glossa Lexer Core - byte-level scanning for Glossa source text.
//!
//! This crate contains the lowest layer of the lexer pipeline:
//! - [`SourceBuffer`]: sentinel-terminated source storage with encoding checks
//! - [`Cursor`]: a `Copy` byte cursor with bulk-skip helpers built on memchr
//! - [`Scanner`]: the total, stack-driven raw scanner
//! - [`RawTag`] / [`RawToken`] / [`State`]: the raw token vocabulary
//!
//! # Design
//!
//! The scanner is **total**: it never fails and it covers every input byte,
//! so the concatenation of raw token lengths always equals the source
//! length. Malformed input surfaces as dedicated tags (`Invalid`,
//! `InvalidString`) instead of errors, which lets an editor keep
//! highlighting past any mistake.
//!
//! Raw tokens carry only a tag and a byte length. Everything that needs
//! the token *text* (keyword resolution, operator classification, line and
//! column positions) lives one layer up, in `glossa_lexer`.
//!
//! This crate has no `glossa_*` dependencies and can be used standalone.

mod cursor;
mod scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use scanner::Scanner;
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use tag::{RawTag, RawToken, State};
