//! Top-level error type for turning text into a statement.

use crate::lexer::LexError;
use crate::parser::ParseError;

/// Why a statement could not be parsed.
///
/// Lexical errors pass through the parser unchanged, so callers can always
/// tell a bad character from a bad sentence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The text could not be tokenized.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// The tokens do not form a SELECT statement.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Byte offset of the offending input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Lex(e) => e.offset(),
            Self::Parse(e) => e.offset(),
        }
    }
}

/// Result type for parsing and analysis.
pub type Result<T> = std::result::Result<T, SyntaxError>;
