//! Statement analysis: the primary table and every function call.

use core::fmt;

use serde::Serialize;
use tracing::debug;

use crate::ast::{Expr, SelectStatement};
use crate::error::Result;
use crate::parser::parse;

/// What one SELECT statement refers to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AnalysisResult {
    /// Name of the first table in the FROM clause, as written.
    pub primary_table: Option<String>,
    /// Every function-call name in pre-order, duplicates included.
    pub function_calls: Vec<String>,
}

impl AnalysisResult {
    /// Analyzes an already-parsed statement.
    ///
    /// Both traversals are read-only, so analyzing the same tree twice gives
    /// equal results.
    #[must_use]
    pub fn of(statement: &SelectStatement) -> Self {
        Self {
            primary_table: primary_table(statement).map(String::from),
            function_calls: function_calls(statement)
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.primary_table {
            Some(table) => writeln!(f, "Table: {table}")?,
            None => writeln!(f, "Table: <none>")?,
        }
        write!(f, "functionNames=[{}]", self.function_calls.join(", "))
    }
}

/// Parses `sql` once and analyzes the resulting tree.
///
/// # Errors
///
/// Returns the lexical or parse error that stopped the parser. A statement
/// that parses but contains no function calls is `Ok` with an empty list.
pub fn analyze(sql: &str) -> Result<AnalysisResult> {
    let statement = parse(sql)?;
    let result = AnalysisResult::of(&statement);
    debug!(
        table = result.primary_table.as_deref().unwrap_or("<none>"),
        functions = result.function_calls.len(),
        "analyzed statement"
    );
    Ok(result)
}

/// Name of the first FROM entry, or `None` for a hand-built statement with
/// no sources.
#[must_use]
pub fn primary_table(statement: &SelectStatement) -> Option<&str> {
    statement.primary_source().map(|t| t.name.as_str())
}

/// Function-call names reachable from any clause of `statement`.
///
/// Clauses are visited in source order. Within an expression the walk is
/// pre-order and left to right, so an outer call is listed before the calls
/// in its arguments.
#[must_use]
pub fn function_calls(statement: &SelectStatement) -> Vec<&str> {
    let mut names = vec![];
    for expr in statement.expressions() {
        walk(expr, &mut |e| {
            if let Expr::Function(call) = e {
                names.push(call.name.as_str());
            }
        });
    }
    names
}

/// Visits `expr` and then each of its sub-expressions, depth first.
pub fn walk<'a>(expr: &'a Expr, visit: &mut impl FnMut(&'a Expr)) {
    visit(expr);
    match expr {
        Expr::Literal(_) | Expr::Column { .. } | Expr::Wildcard { .. } => {}
        Expr::Function(call) => {
            for arg in &call.args {
                walk(arg, visit);
            }
        }
        Expr::Binary { left, right, .. } => {
            walk(left, visit);
            walk(right, visit);
        }
        Expr::Unary { operand, .. } => walk(operand, visit),
        Expr::Paren(inner) | Expr::IsNull { expr: inner, .. } | Expr::Cast { expr: inner, .. } => {
            walk(inner, visit);
        }
        Expr::In { expr, list, .. } => {
            walk(expr, visit);
            for item in list {
                walk(item, visit);
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            walk(expr, visit);
            walk(low, visit);
            walk(high, visit);
        }
        Expr::Case {
            operand,
            when_clauses,
            else_clause,
        } => {
            if let Some(operand) = operand {
                walk(operand, visit);
            }
            for (when, then) in when_clauses {
                walk(when, visit);
                walk(then, visit);
            }
            if let Some(else_clause) = else_clause {
                walk(else_clause, visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{SelectItem, TableRef};

    fn item(expr: Expr) -> SelectItem {
        SelectItem { expr, alias: None }
    }

    #[test]
    fn test_hand_built_statement_without_sources() {
        let stmt = SelectStatement {
            projections: vec![item(Expr::call("now", vec![]))],
            ..SelectStatement::default()
        };
        let result = AnalysisResult::of(&stmt);
        assert_eq!(result.primary_table, None);
        assert_eq!(result.function_calls, ["now"]);
    }

    #[test]
    fn test_pre_order_outer_before_inner() {
        let nested = Expr::call(
            "outer",
            vec![
                Expr::call("left", vec![Expr::call("deep", vec![])]),
                Expr::call("right", vec![]),
            ],
        );
        let stmt = SelectStatement {
            projections: vec![item(nested)],
            sources: vec![TableRef::table("t")],
            ..SelectStatement::default()
        };
        assert_eq!(function_calls(&stmt), ["outer", "left", "deep", "right"]);
    }

    #[test]
    fn test_walk_visits_every_node() {
        let expr = Expr::Between {
            expr: Box::new(Expr::column("a")),
            low: Box::new(Expr::call("f", vec![])),
            high: Box::new(Expr::Paren(Box::new(Expr::call("g", vec![])))),
            negated: false,
        };
        let mut count = 0;
        walk(&expr, &mut |_| count += 1);
        assert_eq!(count, 5);
    }

    #[test]
    fn test_display_matches_repl_rendering() {
        let result = AnalysisResult {
            primary_table: Some(String::from("people")),
            function_calls: vec![String::from("max"), String::from("len")],
        };
        assert_eq!(result.to_string(), "Table: people\nfunctionNames=[max, len]");

        let empty = AnalysisResult {
            primary_table: Some(String::from("users")),
            function_calls: vec![],
        };
        assert_eq!(empty.to_string(), "Table: users\nfunctionNames=[]");
        assert_eq!(
            AnalysisResult::default().to_string(),
            "Table: <none>\nfunctionNames=[]"
        );
    }
}
