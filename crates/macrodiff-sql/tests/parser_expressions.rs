//! Tests for expressions: literals, operators and precedence, function
//! calls, and the special forms IS NULL, IN, BETWEEN, CASE and CAST.

mod common;
use common::*;

use macrodiff_sql::ast::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp};

fn projection(sql: &str) -> Expr {
    parse_select(sql).projections.remove(0).expr
}

fn filter(sql: &str) -> Expr {
    parse_select(sql).filter.expect("WHERE clause")
}

// ===================================================================
// Literals
// ===================================================================

#[test]
fn literals() {
    assert_eq!(projection("select 42 from t"), Expr::Literal(Literal::Integer(42)));
    assert_eq!(projection("select 2.5 from t"), Expr::Literal(Literal::Float(2.5)));
    assert_eq!(
        projection("select 'it''s' from t"),
        Expr::Literal(Literal::String(String::from("it's")))
    );
    assert_eq!(projection("select TRUE from t"), Expr::Literal(Literal::Boolean(true)));
    assert_eq!(projection("select false from t"), Expr::Literal(Literal::Boolean(false)));
    assert_eq!(projection("select null from t"), Expr::Literal(Literal::Null));
}

#[test]
fn decimal_literals_without_leading_or_trailing_digits() {
    assert_eq!(projection("select .5 from t"), Expr::Literal(Literal::Float(0.5)));
    assert_eq!(projection("select 1. from t"), Expr::Literal(Literal::Float(1.0)));
    assert!(matches!(
        filter("select * from t where price between .5 and 10."),
        Expr::Between { .. }
    ));
}

#[test]
fn string_literal_case_is_untouched() {
    assert_eq!(
        projection("SELECT 'MiXeD select' FROM t"),
        Expr::Literal(Literal::String(String::from("MiXeD select")))
    );
}

// ===================================================================
// Operators
// ===================================================================

#[test]
fn and_binds_tighter_than_or() {
    let Expr::Binary { op, right, .. } = filter("select * from t where a or b and c") else {
        panic!("Expected OR");
    };
    assert_eq!(op, BinaryOp::Or);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::And, .. }));
}

#[test]
fn comparison_binds_tighter_than_and() {
    let Expr::Binary { op, left, right } = filter("select * from t where a = 1 and b < 2") else {
        panic!("Expected AND");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Eq, .. }));
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Lt, .. }));
}

#[test]
fn subtraction_is_left_associative() {
    let Expr::Binary { op, left, .. } = projection("select a - b - c from t") else {
        panic!("Expected subtraction");
    };
    assert_eq!(op, BinaryOp::Sub);
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Sub, .. }));
}

#[test]
fn parentheses_override_precedence() {
    let Expr::Binary { op, left, .. } = projection("select (1 + 2) * 3 from t") else {
        panic!("Expected multiplication");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(*left, Expr::Paren(_)));
}

#[test]
fn not_negates_the_comparison() {
    let Expr::Unary { op, operand } = filter("select * from t where not a = 1") else {
        panic!("Expected NOT");
    };
    assert_eq!(op, UnaryOp::Not);
    assert!(matches!(*operand, Expr::Binary { op: BinaryOp::Eq, .. }));
}

#[test]
fn unary_minus_binds_tightest() {
    let Expr::Binary { op, left, .. } = projection("select -a * b from t") else {
        panic!("Expected multiplication");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(*left, Expr::Unary { op: UnaryOp::Neg, .. }));
}

#[test]
fn concat_and_not_equal_spellings() {
    assert!(matches!(
        projection("select a || b from t"),
        Expr::Binary { op: BinaryOp::Concat, .. }
    ));
    for sql in ["select * from t where a != b", "select * from t where a <> b"] {
        assert!(matches!(filter(sql), Expr::Binary { op: BinaryOp::NotEq, .. }), "{sql}");
    }
}

// ===================================================================
// Function calls
// ===================================================================

#[test]
fn function_call_with_arguments() {
    let Expr::Function(FunctionCall { name, args, distinct, .. }) =
        projection("select substr(name, 1, 3) from t")
    else {
        panic!("Expected function call");
    };
    assert_eq!(name, "substr");
    assert_eq!(args.len(), 3);
    assert!(!distinct);
}

#[test]
fn function_call_count_star() {
    let Expr::Function(FunctionCall { name, args, .. }) = projection("select COUNT(*) from t")
    else {
        panic!("Expected COUNT(*)");
    };
    assert_eq!(name, "COUNT");
    assert_eq!(args, vec![Expr::Wildcard { table: None }]);
}

#[test]
fn function_call_distinct() {
    let Expr::Function(call) = projection("select count(distinct a) from t") else {
        panic!("Expected function call");
    };
    assert!(call.distinct);
    assert_eq!(call.args.len(), 1);
}

#[test]
fn function_call_no_arguments() {
    let Expr::Function(call) = projection("select now() from t") else {
        panic!("Expected function call");
    };
    assert!(call.args.is_empty());
}

#[test]
fn nested_function_arguments_are_full_expressions() {
    let Expr::Function(outer) = projection("select round(avg(price) * 1.1, 2) from t") else {
        panic!("Expected function call");
    };
    let Expr::Binary { left, .. } = &outer.args[0] else {
        panic!("Expected multiplication argument");
    };
    assert_eq!(left.as_function().map(|f| f.name.as_str()), Some("avg"));
}

// ===================================================================
// Special forms
// ===================================================================

#[test]
fn is_null_and_is_not_null() {
    assert!(matches!(
        filter("select * from t where x is null"),
        Expr::IsNull { negated: false, .. }
    ));
    assert!(matches!(
        filter("select * from t where x IS NOT NULL"),
        Expr::IsNull { negated: true, .. }
    ));
}

#[test]
fn in_list() {
    let Expr::In { list, negated, .. } = filter("select * from t where x in (1, 2, 3)") else {
        panic!("Expected IN");
    };
    assert_eq!(list.len(), 3);
    assert!(!negated);
}

#[test]
fn between_bounds() {
    let Expr::Between {
        low, high, negated, ..
    } = filter("select * from t where x between 1 and 10")
    else {
        panic!("Expected BETWEEN");
    };
    assert_eq!(*low, Expr::Literal(Literal::Integer(1)));
    assert_eq!(*high, Expr::Literal(Literal::Integer(10)));
    assert!(!negated);
}

#[test]
fn searched_and_simple_case() {
    let Expr::Case {
        operand,
        when_clauses,
        else_clause,
    } = projection(
        "select case when a > 1 then 'big' when a > 0 then 'small' else 'none' end from t",
    )
    else {
        panic!("Expected CASE");
    };
    assert!(operand.is_none());
    assert_eq!(when_clauses.len(), 2);
    assert!(else_clause.is_some());

    let Expr::Case { operand, else_clause, .. } =
        projection("select case status when 1 then 'on' end from t")
    else {
        panic!("Expected CASE");
    };
    assert!(operand.is_some());
    assert!(else_clause.is_none());
}

#[test]
fn cast_keeps_type_name() {
    let Expr::Cast { type_name, .. } = projection("select cast(a as DECIMAL(10, 2)) from t") else {
        panic!("Expected CAST");
    };
    assert_eq!(type_name, "DECIMAL(10, 2)");

    let Expr::Cast { type_name, .. } = projection("select cast(a as text) from t") else {
        panic!("Expected CAST");
    };
    assert_eq!(type_name, "text");
}
