//! SQL Parser
//!
//! A hand-written recursive descent parser for the `SELECT` subset, with
//! Pratt parsing for expressions. The first mismatch aborts the parse; there
//! is no error recovery and no partial tree.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::{parse, Parser, MAX_EXPRESSION_DEPTH};
