#![allow(dead_code)]

use raincloud_sql::compiler::ast::{Expression, Statement};
use raincloud_sql::compiler::parser::parse;
use raincloud_sql::compiler::scanner::lex;
use raincloud_sql::compiler::token::TokenKind;

/// Kind and value of every token in `sql`
pub fn collect_tokens(sql: &str) -> Vec<(TokenKind, String)> {
    lex(sql)
        .unwrap()
        .into_iter()
        .map(|token| (token.kind, token.value))
        .collect()
}

pub fn token(kind: TokenKind, value: &str) -> (TokenKind, String) {
    (kind, value.to_string())
}

pub fn parse_sql(sql: &str) -> Vec<Statement> {
    parse(sql).unwrap().statements
}

/// Kind and value of each literal expression
pub fn literals(expressions: &[Expression]) -> Vec<(TokenKind, &str)> {
    expressions
        .iter()
        .map(|expression| {
            let token = expression.literal();
            (token.kind, token.value.as_str())
        })
        .collect()
}
