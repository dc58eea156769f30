//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer that turns statement text into a lazy stream of
//! tokens. Whitespace and comments never reach the parser.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{tokenize, Lexer};
