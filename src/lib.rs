//! SQL front-end: scans query text into tokens and parses SELECT, INSERT and
//! CREATE TABLE statements into an [`Ast`].

pub mod compiler;
pub mod types;

pub use compiler::ast::Ast;
pub use compiler::config::LexerConfig;
pub use compiler::parser::{parse, parse_with_config, Parser};
pub use compiler::scanner::{lex, lex_with_config, Scanner};
pub use compiler::token::{Location, Token, TokenKind};
pub use types::{SqlError, SqlResult};
