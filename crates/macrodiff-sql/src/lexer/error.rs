//! Lexical errors.

/// A character sequence the lexer could not turn into a token.
///
/// Every variant carries the byte offset where the offending lexeme starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at position {offset}")]
    UnexpectedCharacter {
        /// The character.
        ch: char,
        /// Its byte offset.
        offset: usize,
    },

    /// A `'...` string literal with no closing quote.
    #[error("unterminated string literal starting at position {offset}")]
    UnterminatedString {
        /// Offset of the opening quote.
        offset: usize,
    },

    /// A `"..."` or `` `...` `` identifier with no closing quote.
    #[error("unterminated quoted identifier starting at position {offset}")]
    UnterminatedIdentifier {
        /// Offset of the opening quote.
        offset: usize,
    },

    /// A `/*` comment with no closing `*/`.
    #[error("unterminated block comment starting at position {offset}")]
    UnterminatedComment {
        /// Offset of the `/*`.
        offset: usize,
    },

    /// A numeric literal that does not parse, such as `1e` or an integer
    /// that overflows 64 bits.
    #[error("invalid number '{text}' at position {offset}")]
    InvalidNumber {
        /// The literal as written.
        text: String,
        /// Its byte offset.
        offset: usize,
    },
}

impl LexError {
    /// Byte offset of the offending input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { offset, .. }
            | Self::UnterminatedString { offset }
            | Self::UnterminatedIdentifier { offset }
            | Self::UnterminatedComment { offset }
            | Self::InvalidNumber { offset, .. } => *offset,
        }
    }
}
