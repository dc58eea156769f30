//! SELECT statement AST types.

use super::expression::Expr;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

/// One entry of the projection list: `expr [[AS] alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    /// The projected expression.
    pub expr: Expr,
    /// Output alias.
    pub alias: Option<String>,
}

/// A table named in the FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Schema qualifier of `schema.table`.
    pub schema: Option<String>,
    /// Table name as written.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates an unqualified, unaliased table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A SELECT statement.
///
/// Trees built by the parser always have at least one entry in `sources`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// The projection list.
    pub projections: Vec<SelectItem>,
    /// FROM clause entries in source order.
    pub sources: Vec<TableRef>,
    /// WHERE clause.
    pub filter: Option<Expr>,
    /// GROUP BY clause.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clause.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
}

impl SelectStatement {
    /// The first FROM entry.
    #[must_use]
    pub fn primary_source(&self) -> Option<&TableRef> {
        self.sources.first()
    }

    /// Every top-level expression of the statement in clause order:
    /// projections, WHERE, GROUP BY, HAVING, ORDER BY, LIMIT, OFFSET.
    pub fn expressions(&self) -> impl Iterator<Item = &Expr> {
        self.projections
            .iter()
            .map(|item| &item.expr)
            .chain(self.filter.iter())
            .chain(self.group_by.iter())
            .chain(self.having.iter())
            .chain(self.order_by.iter().map(|o| &o.expr))
            .chain(self.limit.iter())
            .chain(self.offset.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expressions_follow_clause_order() {
        let stmt = SelectStatement {
            projections: vec![SelectItem {
                expr: Expr::column("a"),
                alias: None,
            }],
            sources: vec![TableRef::table("t")],
            filter: Some(Expr::column("w")),
            group_by: vec![Expr::column("g")],
            having: Some(Expr::column("h")),
            order_by: vec![OrderBy {
                expr: Expr::column("o"),
                direction: OrderDirection::Desc,
            }],
            limit: Some(Expr::column("l")),
            offset: Some(Expr::column("f")),
            ..SelectStatement::default()
        };
        let names: Vec<&str> = stmt
            .expressions()
            .map(|e| match e {
                Expr::Column { name, .. } => name.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, ["a", "w", "g", "h", "o", "l", "f"]);
    }

    #[test]
    fn test_primary_source() {
        let mut stmt = SelectStatement::default();
        assert!(stmt.primary_source().is_none());
        stmt.sources = vec![TableRef::table("a").alias("x"), TableRef::table("b")];
        assert_eq!(stmt.primary_source().map(|t| t.name.as_str()), Some("a"));
    }
}
