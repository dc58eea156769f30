//! SQL Parser implementation.

use tracing::trace;

use super::error::ParseError;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    BinaryOp, Expr, FunctionCall, Literal, OrderBy, OrderDirection, SelectItem, SelectStatement,
    TableRef,
};
use crate::error::Result;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Parses `input` as a single SELECT statement.
///
/// # Errors
///
/// Returns a [`SyntaxError`](crate::SyntaxError) for the first lexical or
/// grammatical problem in the input.
pub fn parse(input: &str) -> Result<SelectStatement> {
    Parser::new(input)?.parse_select()
}

/// How deep expressions may nest before the parser gives up.
///
/// Counts both nested sub-expressions and operators chained onto one
/// operand, which bounds the height of every tree the parser builds.
pub const MAX_EXPRESSION_DEPTH: usize = 100;

/// SQL Parser.
///
/// Pulls tokens from the [`Lexer`] one at a time; a lexical error surfaces
/// as soon as the parser reaches it.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned on the first token of `input`.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if the first token cannot be scanned.
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parses one SELECT statement that must span the whole input. A single
    /// trailing `;` is allowed.
    ///
    /// # Errors
    ///
    /// Returns a `SyntaxError` if the input is not exactly one valid SELECT
    /// statement.
    pub fn parse_select(&mut self) -> Result<SelectStatement> {
        let statement = self.parse_query()?;
        if self.check(&TokenKind::Semicolon) {
            self.advance()?;
        }
        if !self.current.is_eof() {
            return self.unexpected("end of input");
        }
        Ok(statement)
    }

    /// Parses `SELECT ... FROM ... [clauses]`.
    fn parse_query(&mut self) -> Result<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.eat_keyword(Keyword::Distinct)? {
            true
        } else {
            self.eat_keyword(Keyword::All)?;
            false
        };

        let projections = self.parse_select_items()?;

        self.expect_keyword(Keyword::From)?;
        let sources = self.parse_table_refs()?;

        let filter = if self.eat_keyword(Keyword::Where)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let group_by = if self.eat_keyword(Keyword::Group)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        let having = if self.eat_keyword(Keyword::Having)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let order_by = if self.eat_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };

        let limit = if self.eat_keyword(Keyword::Limit)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let offset = if self.eat_keyword(Keyword::Offset)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            projections,
            sources,
            filter,
            group_by,
            having,
            order_by,
            limit,
            offset,
        })
    }

    /// Parses the projection list.
    fn parse_select_items(&mut self) -> Result<Vec<SelectItem>> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let alias = self.parse_optional_alias()?;
            items.push(SelectItem { expr, alias });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }
        Ok(items)
    }

    /// Parses the comma-separated FROM list. At least one entry is required.
    fn parse_table_refs(&mut self) -> Result<Vec<TableRef>> {
        let mut sources = vec![];
        loop {
            sources.push(self.parse_table_ref()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }
        Ok(sources)
    }

    /// Parses `name`, `schema.name`, either with an optional alias.
    fn parse_table_ref(&mut self) -> Result<TableRef> {
        let (first, _) = self.expect_identifier("table name")?;
        let (schema, name) = if self.check(&TokenKind::Dot) {
            self.advance()?;
            let (table, _) = self.expect_identifier("table name")?;
            (Some(first), table)
        } else {
            (None, first)
        };

        let mut table = TableRef::table(name);
        table.schema = schema;
        if let Some(alias) = self.parse_optional_alias()? {
            table = table.alias(alias);
        }
        Ok(table)
    }

    /// Parses an optional `AS alias` or bare `alias`.
    fn parse_optional_alias(&mut self) -> Result<Option<String>> {
        if self.eat_keyword(Keyword::As)? {
            let (alias, _) = self.expect_identifier("alias")?;
            Ok(Some(alias))
        } else if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let (alias, _) = self.expect_identifier("alias")?;
            Ok(Some(alias))
        } else {
            Ok(None)
        }
    }

    /// Parses an ORDER BY list.
    fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.eat_keyword(Keyword::Desc)? {
                OrderDirection::Desc
            } else {
                self.eat_keyword(Keyword::Asc)?;
                OrderDirection::Asc
            };
            items.push(OrderBy { expr, direction });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }
        Ok(items)
    }

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr> {
        let depth = self.depth;
        let result = self.parse_expression_bounded(min_bp);
        self.depth = depth;
        result
    }

    fn parse_expression_bounded(&mut self, min_bp: u8) -> Result<Expr> {
        self.descend()?;
        let mut lhs = self.parse_prefix()?;

        while let Some((l_bp, r_bp)) = infix_binding_power(&self.current.kind) {
            if l_bp < min_bp {
                break;
            }
            self.descend()?;

            lhs = match self.current.as_keyword() {
                Some(Keyword::Is) => {
                    self.advance()?;
                    let negated = self.eat_keyword(Keyword::Not)?;
                    self.expect_keyword(Keyword::Null)?;
                    Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                    }
                }
                Some(Keyword::Not) => {
                    self.advance()?;
                    self.parse_negatable(lhs, r_bp, true)?
                }
                Some(Keyword::In | Keyword::Between | Keyword::Like) => {
                    self.parse_negatable(lhs, r_bp, false)?
                }
                _ => {
                    let Some(op) = token_to_binary_op(&self.current.kind) else {
                        return self.unexpected("operator");
                    };
                    self.advance()?;
                    let rhs = self.parse_expression(r_bp)?;
                    Expr::Binary {
                        left: Box::new(lhs),
                        op,
                        right: Box::new(rhs),
                    }
                }
            };
        }

        Ok(lhs)
    }

    /// Parses the tail of `[NOT] IN (...)`, `[NOT] BETWEEN .. AND ..` or
    /// `[NOT] LIKE ..`, with the current token on IN, BETWEEN or LIKE.
    fn parse_negatable(&mut self, lhs: Expr, r_bp: u8, negated: bool) -> Result<Expr> {
        match self.current.as_keyword() {
            Some(Keyword::In) => {
                self.advance()?;
                self.expect(&TokenKind::LeftParen)?;
                let list = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::In {
                    expr: Box::new(lhs),
                    list,
                    negated,
                })
            }
            Some(Keyword::Between) => {
                self.advance()?;
                let low = self.parse_expression(r_bp)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(r_bp)?;
                Ok(Expr::Between {
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                })
            }
            Some(Keyword::Like) => {
                self.advance()?;
                let pattern = self.parse_expression(r_bp)?;
                Ok(Expr::Binary {
                    left: Box::new(lhs),
                    op: if negated {
                        BinaryOp::NotLike
                    } else {
                        BinaryOp::Like
                    },
                    right: Box::new(pattern),
                })
            }
            _ => self.unexpected("IN, BETWEEN, or LIKE"),
        }
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr> {
        if let (Some(op), Some(bp)) = (
            token_to_unary_op(&self.current.kind),
            prefix_binding_power(&self.current.kind),
        ) {
            self.advance()?;
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current.clone();

        match token.kind {
            // Literals
            TokenKind::Integer(n) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Integer(n)))
            }
            TokenKind::Float(f) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Float(f)))
            }
            TokenKind::String(s) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::String(s)))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Null))
            }

            // Wildcard
            TokenKind::Star => {
                self.advance()?;
                Ok(Expr::Wildcard { table: None })
            }

            // Parenthesized expression
            TokenKind::LeftParen => {
                self.advance()?;
                let expr = self.parse_expression(0)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Paren(Box::new(expr)))
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expression(),

            // Identifier (column reference or function call)
            TokenKind::Identifier(name) => {
                let span = token.span;
                self.advance()?;

                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call(name, span);
                }

                // table.column or table.*
                if self.check(&TokenKind::Dot) {
                    self.advance()?;
                    if self.check(&TokenKind::Star) {
                        self.advance()?;
                        return Ok(Expr::Wildcard { table: Some(name) });
                    }
                    let (column, column_span) = self.expect_identifier("column name")?;
                    return Ok(Expr::Column {
                        table: Some(name),
                        name: column,
                        span: span.merge(column_span),
                    });
                }

                Ok(Expr::Column {
                    table: None,
                    name,
                    span,
                })
            }

            _ => self.unexpected("identifier or expression"),
        }
    }

    /// Parses the argument list of a function call whose name was just
    /// consumed.
    fn parse_function_call(&mut self, name: String, name_span: Span) -> Result<Expr> {
        self.expect(&TokenKind::LeftParen)?;

        let distinct = self.eat_keyword(Keyword::Distinct)?;

        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };

        let close = self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Function(FunctionCall {
            name,
            args,
            distinct,
            span: name_span.merge(close),
        }))
    }

    /// Parses `CAST(expr AS type)`, where type may carry `(n)` or `(p, s)`.
    fn parse_cast_expression(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;

        let (mut type_name, _) = self.expect_identifier("type name")?;
        if self.check(&TokenKind::LeftParen) {
            self.advance()?;
            let mut params = vec![self.expect_integer()?];
            if self.check(&TokenKind::Comma) {
                self.advance()?;
                params.push(self.expect_integer()?);
            }
            self.expect(&TokenKind::RightParen)?;
            type_name = format!("{type_name}({})", params.join(", "));
        }

        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            type_name,
        })
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::Case)?;

        // Simple CASE (CASE expr WHEN ...)
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        if !self.check_keyword(Keyword::When) {
            return self.unexpected("WHEN");
        }

        let mut when_clauses = vec![];
        while self.eat_keyword(Keyword::When)? {
            let when_expr = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then_expr = self.parse_expression(0)?;
            when_clauses.push((when_expr, then_expr));
        }

        let else_clause = if self.eat_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<Expr>> {
        let mut exprs = vec![];
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }
        Ok(exprs)
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        trace!(kind = ?self.current.kind, offset = self.current.span.start, "token");
        Ok(())
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    /// Consumes the given keyword if it is next; reports whether it did.
    fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects the current token to be the given kind and returns its span.
    fn expect(&mut self, kind: &TokenKind) -> Result<Span> {
        if self.check(kind) {
            let span = self.current.span;
            self.advance()?;
            Ok(span)
        } else {
            self.unexpected(kind.describe())
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.eat_keyword(keyword)? {
            Ok(())
        } else {
            self.unexpected(keyword.as_str())
        }
    }

    /// Expects and returns an identifier; `what` names it in the error.
    fn expect_identifier(&mut self, what: &str) -> Result<(String, Span)> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let found = (name.clone(), self.current.span);
                self.advance()?;
                Ok(found)
            }
            _ => self.unexpected(what),
        }
    }

    /// Expects an integer literal and returns it as written.
    fn expect_integer(&mut self) -> Result<String> {
        if matches!(self.current.kind, TokenKind::Integer(_)) {
            let text = self.current.text.clone();
            self.advance()?;
            Ok(text)
        } else {
            self.unexpected("integer")
        }
    }

    /// Takes one more level of expression depth.
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_EXPRESSION_DEPTH {
            return self.unexpected("less deeply nested expression");
        }
        Ok(())
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T> {
        Err(ParseError::unexpected(expected, &self.current).into())
    }
}
