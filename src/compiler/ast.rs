use serde::Serialize;
use crate::compiler::token::Token;

/// Parsed source: one statement per `;`-terminated input statement, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ast {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    CreateTable(CreateTableStatement),
}

/// SELECT items [FROM table]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectStatement {
    pub items: Vec<Expression>,
    pub from: Option<Token>,
}

/// INSERT INTO table VALUES (values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertStatement {
    pub table: Token,
    pub values: Vec<Expression>,
}

/// CREATE TABLE name (columns)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTableStatement {
    pub name: Token,
    pub columns: Vec<ColumnDefinition>,
}

/// Column Definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: Token,
    pub datatype: Token, // `int` or `text` keyword
}

/// Expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Literal(Token),
}

// AST node methods
impl Ast {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Expression {
    /// Token the expression was built from
    pub fn literal(&self) -> &Token {
        match self {
            Expression::Literal(token) => token,
        }
    }
}
