//! # macrodiff-sql
//!
//! A small syntactic front end for SQL `SELECT` statements.
//!
//! This crate provides:
//! - A hand-written lexer producing a lazy stream of tokens
//! - A recursive descent parser with Pratt expression parsing
//! - An analyzer that reports the primary table of a statement and every
//!   function call it contains
//!
//! ```rust
//! use macrodiff_sql::analyze;
//!
//! let result = analyze("select max(len(name)) from people").unwrap();
//! assert_eq!(result.primary_table.as_deref(), Some("people"));
//! assert_eq!(result.function_calls, ["max", "len"]);
//! ```
//!
//! Lexical and grammatical failures are distinct:
//!
//! ```rust
//! use macrodiff_sql::{analyze, SyntaxError};
//!
//! assert!(matches!(analyze("select 'oops from t"), Err(SyntaxError::Lex(_))));
//! assert!(matches!(analyze("select from"), Err(SyntaxError::Parse(_))));
//! ```
//!
//! There is no semantic validation: tables and columns are never resolved.

pub mod analyzer;
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use analyzer::{analyze, AnalysisResult};
pub use ast::{Expr, SelectStatement};
pub use error::SyntaxError;
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::{parse, ParseError, Parser};
