//! Glossa Lexer - token assembly over `glossa_lexer_core`.
//!
//! Glossa is a Greek-keyword educational pseudocode language; this crate
//! turns raw scanner output into the tokens an editor highlights:
//!
//! - [`Lexer`] / [`scan`]: pull- and eager-mode lexing sessions
//! - [`Token`] / [`TokenKind`] / [`Position`]: the output vocabulary
//! - [`normalize`]: Greek accent/case folding for keyword matching
//! - [`ScanDiagnostic`]: anomalies, collected on the side (never `Err`)
//! - [`highlight`]: the per-line `(kind, column)` contract editors consume
//! - [`host`]: traits shared with the execution engine and editor shell
//!
//! # Guarantees
//!
//! Lexing is total and lossless: every input produces a token stream, the
//! concatenated lexemes reproduce the source byte for byte, and the same
//! input always produces the same stream. Keyword recognition is
//! case-insensitive and accent-insensitive, but lexemes and positions
//! always reflect the text as typed.

mod classify;
mod diagnostics;
mod highlight;
pub mod host;
mod keywords;
mod lexer;
mod normalize;
mod position;
mod token;

pub use diagnostics::{DiagnosticKind, ScanDiagnostic, Span};
pub use highlight::{highlight, LineToken};
pub use host::highlight_document;
pub use lexer::{scan, Lexer, ScanResult};
pub use normalize::normalize;
pub use position::Position;
pub use token::{Token, TokenKind};

// The scanner's building blocks, for tools that want raw access.
pub use glossa_lexer_core::{EncodingIssue, EncodingIssueKind, SourceBuffer};
