#![allow(dead_code)]

use macrodiff_sql::{
    analyze, parse, AnalysisResult, LexError, ParseError, SelectStatement, SyntaxError,
};

pub fn parse_select(sql: &str) -> SelectStatement {
    parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    match parse(sql) {
        Err(SyntaxError::Parse(e)) => e,
        other => panic!("Expected parse error for: {sql}\nGot: {other:?}"),
    }
}

pub fn lex_err(sql: &str) -> LexError {
    match parse(sql) {
        Err(SyntaxError::Lex(e)) => e,
        other => panic!("Expected lex error for: {sql}\nGot: {other:?}"),
    }
}

pub fn analyze_ok(sql: &str) -> AnalysisResult {
    analyze(sql).unwrap_or_else(|e| panic!("Failed to analyze: {sql}\nError: {e}"))
}

/// Function names found in `sql`, in pre-order.
pub fn functions(sql: &str) -> Vec<String> {
    analyze_ok(sql).function_calls
}

pub fn table(sql: &str) -> Option<String> {
    analyze_ok(sql).primary_table
}
