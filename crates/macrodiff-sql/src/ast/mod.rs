//! Abstract Syntax Tree (AST) types for SELECT statements.
//!
//! Children are owned by their parent; a tree is built bottom-up by the
//! parser and never mutated afterwards.

mod expression;
mod statement;

pub use expression::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp};
pub use statement::{OrderBy, OrderDirection, SelectItem, SelectStatement, TableRef};
