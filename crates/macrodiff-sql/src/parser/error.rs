//! Parser error types.

use crate::lexer::{Span, Token};

/// A grammar violation: the parser wanted `expected` but saw `found`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found '{found}' at position {}", .span.start)]
pub struct ParseError {
    /// Description of the construct the grammar required.
    pub expected: String,
    /// Source text of the offending token, or `end of input`.
    pub found: String,
    /// The location of the offending token.
    pub span: Span,
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        Self {
            expected: expected.into(),
            found: found.display_text(),
            span: found.span,
        }
    }

    /// Byte offset of the offending token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }

    /// Returns true when the input ended before the statement was complete.
    #[must_use]
    pub fn is_unexpected_eof(&self) -> bool {
        self.span.is_empty() && self.found == "end of input"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Keyword, TokenKind};

    #[test]
    fn test_display_names_expected_found_and_position() {
        let from = Token::new(TokenKind::Keyword(Keyword::From), "from", Span::new(7, 11));
        let err = ParseError::unexpected("expression", &from);
        assert_eq!(err.to_string(), "expected expression, found 'from' at position 7");
        assert_eq!(err.offset(), 7);
        assert!(!err.is_unexpected_eof());
    }

    #[test]
    fn test_unexpected_eof() {
        let err = ParseError::unexpected("identifier", &Token::eof(13));
        assert_eq!(err.found, "end of input");
        assert!(err.is_unexpected_eof());
    }
}
