//! Tests for the SELECT skeleton: projections, FROM list, and the
//! optional trailing clauses.

mod common;
use common::*;

use macrodiff_sql::ast::{Expr, Literal, OrderDirection, TableRef};

// ===================================================================
// Projections
// ===================================================================

#[test]
fn projection_star() {
    let s = parse_select("SELECT * FROM users");
    assert_eq!(s.projections.len(), 1);
    assert!(matches!(s.projections[0].expr, Expr::Wildcard { table: None }));
}

#[test]
fn projection_qualified_star() {
    let s = parse_select("SELECT u.* FROM users u");
    assert!(matches!(
        &s.projections[0].expr,
        Expr::Wildcard { table: Some(t) } if t == "u"
    ));
}

#[test]
fn projection_aliases() {
    let s = parse_select("SELECT a AS x, b y, c FROM t");
    let aliases: Vec<_> = s.projections.iter().map(|p| p.alias.as_deref()).collect();
    assert_eq!(aliases, [Some("x"), Some("y"), None]);
}

#[test]
fn projection_qualified_column() {
    let s = parse_select("SELECT t.id FROM t");
    assert!(matches!(
        &s.projections[0].expr,
        Expr::Column { table: Some(t), name, .. } if t == "t" && name == "id"
    ));
}

#[test]
fn distinct_and_all() {
    assert!(parse_select("SELECT DISTINCT a FROM t").distinct);
    assert!(!parse_select("SELECT ALL a FROM t").distinct);
    assert!(!parse_select("SELECT a FROM t").distinct);
}

// ===================================================================
// FROM
// ===================================================================

#[test]
fn from_single_table() {
    let s = parse_select("select * from users");
    assert_eq!(s.sources, vec![TableRef::table("users")]);
}

#[test]
fn from_comma_list_keeps_order() {
    let s = parse_select("select 1 from a, b x, c as y");
    assert_eq!(
        s.sources,
        vec![
            TableRef::table("a"),
            TableRef::table("b").alias("x"),
            TableRef::table("c").alias("y"),
        ]
    );
}

#[test]
fn from_schema_qualified() {
    let s = parse_select("select * from analytics.events e");
    assert_eq!(s.sources[0].schema.as_deref(), Some("analytics"));
    assert_eq!(s.sources[0].name, "events");
    assert_eq!(s.sources[0].alias.as_deref(), Some("e"));
}

#[test]
fn from_quoted_table() {
    let s = parse_select("select * from `weird table`");
    assert_eq!(s.sources[0].name, "weird table");
}

#[test]
fn parsed_statements_always_have_a_source() {
    for sql in [
        "select 1 from t",
        "select a, b from t1, t2 where a = b",
        "select count(*) from t group by x having count(*) > 1 order by x limit 3",
    ] {
        assert!(!parse_select(sql).sources.is_empty(), "{sql}");
    }
}

// ===================================================================
// Trailing clauses
// ===================================================================

#[test]
fn where_clause() {
    let s = parse_select("SELECT * FROM t WHERE id = 1");
    assert!(s.filter.is_some());
}

#[test]
fn group_by_and_having() {
    let s = parse_select("SELECT a, count(*) FROM t GROUP BY a, b HAVING count(*) > 2");
    assert_eq!(s.group_by.len(), 2);
    assert!(s.having.is_some());
}

#[test]
fn order_by_directions() {
    let s = parse_select("SELECT * FROM t ORDER BY a, b DESC, c ASC");
    let dirs: Vec<_> = s.order_by.iter().map(|o| o.direction).collect();
    assert_eq!(
        dirs,
        [OrderDirection::Asc, OrderDirection::Desc, OrderDirection::Asc]
    );
}

#[test]
fn limit_and_offset() {
    let s = parse_select("SELECT * FROM t LIMIT 10 OFFSET 20");
    assert_eq!(s.limit, Some(Expr::Literal(Literal::Integer(10))));
    assert_eq!(s.offset, Some(Expr::Literal(Literal::Integer(20))));
}

#[test]
fn trailing_semicolon() {
    let s = parse_select("select * from t;");
    assert_eq!(s.sources[0].name, "t");
}

#[test]
fn comments_anywhere() {
    let s = parse_select("select /* cols */ a -- first\n from t -- done");
    assert_eq!(s.projections.len(), 1);
    assert_eq!(s.sources[0].name, "t");
}
