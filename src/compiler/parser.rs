use tracing::{debug, trace};
use crate::compiler::ast::*;
use crate::compiler::config::{LexerConfig, DATA_TYPES};
use crate::compiler::scanner::Scanner;
use crate::compiler::token::{Keyword, Location, Symbol, Token, TokenKind};
use crate::types::{SqlError, SqlResult};

/// Parsed value and the position of the next unread token
type ParseResult<T> = SqlResult<(T, usize)>;

type StatementParser = fn(&Parser, usize) -> ParseResult<Statement>;

/// Statement forms in the order the dispatcher tries them
const STATEMENTS: [(&str, StatementParser); 3] = [
    ("select", Parser::parse_select),
    ("insert", Parser::parse_insert),
    ("create table", Parser::parse_create_table),
];

/// Backtracking parser over a scanned token stream.
///
/// Every parse function takes the position to start from and returns the
/// position after what it consumed, so a failed alternative leaves nothing
/// to undo.
pub struct Parser {
    tokens: Vec<Token>,
}

impl Parser {

    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens }
    }

    /// Creating parser from scanner result
    pub fn from_source(source: &str) -> SqlResult<Self> {
        Ok(Self::new(Scanner::new(source).scan()?))
    }

    pub fn from_source_with_config(source: &str, config: &LexerConfig) -> SqlResult<Self> {
        Ok(Self::new(Scanner::with_config(source, config).scan()?))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Main parser method
    pub fn parse(&self) -> SqlResult<Ast> {
        let mut statements = vec![];
        let mut pos = 0;

        while pos < self.tokens.len() {
            let (statement, next) = self.parse_statement(pos)?;
            statements.push(statement);
            pos = next;
        }

        Ok(Ast { statements })
    }

    /**
    statement := ( select_stmt | insert_stmt | create_table_stmt ) ;

    Alternatives are tried in order from the same start position. When all
    of them fail, the failure that got furthest into the input is reported.
     */
    pub fn parse_statement(&self, start: usize) -> ParseResult<Statement> {
        let semicolon = Token::symbol(Symbol::Semicolon);
        let mut furthest: Option<(usize, SqlError)> = None;

        for (name, alternative) in STATEMENTS {
            let attempt = alternative(self, start).and_then(|(statement, pos)| {
                Ok((statement, self.match_token_literal(pos, &semicolon)?))
            });

            match attempt {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    let failed_at = self.failure_position(&err, start);
                    trace!(statement = name, start, failed_at, %err, "backtracking");
                    if furthest.as_ref().map_or(true, |(pos, _)| failed_at > *pos) {
                        furthest = Some((failed_at, err));
                    }
                }
            }
        }

        let err = match furthest {
            Some((pos, err)) if pos > start => err,
            // nothing got past the first token
            _ => self.error_at(start, "expected SELECT, INSERT or CREATE TABLE"),
        };
        debug!(%err, "unable to parse statement");
        Err(err)
    }

    /**
    select_stmt := SELECT expression (, expression)* (FROM identifier)?
     */
    fn parse_select(&self, start: usize) -> ParseResult<Statement> {
        let from_keyword = Token::keyword(Keyword::From);
        let mut pos = self.match_token_literal(start, &Token::keyword(Keyword::Select))?;

        let delimiters = [Token::symbol(Symbol::Semicolon), from_keyword.clone()];
        let (items, next) = self.parse_expressions(pos, &delimiters)?;
        pos = next;

        let mut from = None;
        if self.expect_token(pos, &from_keyword) {
            let (table, next) = self.match_token_kind(pos + 1, TokenKind::Identifier)?;
            from = Some(table.clone());
            pos = next;
        }

        Ok((Statement::Select(SelectStatement { items, from }), pos))
    }

    /**
    insert_stmt := INSERT INTO identifier VALUES ( expression (, expression)* )
     */
    fn parse_insert(&self, start: usize) -> ParseResult<Statement> {
        let right_paren = Token::symbol(Symbol::RightParen);

        let mut pos = self.match_token_literal(start, &Token::keyword(Keyword::Insert))?;
        pos = self.match_token_literal(pos, &Token::keyword(Keyword::Into))?;

        let (table, next) = self.match_token_kind(pos, TokenKind::Identifier)?;
        pos = self.match_token_literal(next, &Token::keyword(Keyword::Values))?;
        pos = self.match_token_literal(pos, &Token::symbol(Symbol::LeftParen))?;

        let (values, next) = self.parse_expressions(pos, std::slice::from_ref(&right_paren))?;
        pos = self.match_token_literal(next, &right_paren)?;

        Ok((Statement::Insert(InsertStatement { table: table.clone(), values }), pos))
    }

    /**
    create_table_stmt := CREATE TABLE identifier ( column_def (, column_def)* )
     */
    fn parse_create_table(&self, start: usize) -> ParseResult<Statement> {
        let right_paren = Token::symbol(Symbol::RightParen);

        let mut pos = self.match_token_literal(start, &Token::keyword(Keyword::Create))?;
        pos = self.match_token_literal(pos, &Token::keyword(Keyword::Table))?;

        let (name, next) = self.match_token_kind(pos, TokenKind::Identifier)?;
        pos = self.match_token_literal(next, &Token::symbol(Symbol::LeftParen))?;

        let (columns, next) = self.parse_delimited(
            pos,
            std::slice::from_ref(&right_paren),
            Self::parse_column_definition,
        )?;
        pos = self.match_token_literal(next, &right_paren)?;

        Ok((Statement::CreateTable(CreateTableStatement { name: name.clone(), columns }), pos))
    }

    /**
    column_def := identifier data_type
     */
    fn parse_column_definition(&self, start: usize) -> ParseResult<ColumnDefinition> {
        let (name, pos) = self.match_token_kind(start, TokenKind::Identifier)?;
        let (datatype, pos) = self.parse_data_type(pos)?;
        Ok((ColumnDefinition { name: name.clone(), datatype }, pos))
    }

    /**
    data_type := INT | TEXT
     */
    fn parse_data_type(&self, pos: usize) -> ParseResult<Token> {
        let is_data_type = |token: &Token| {
            token.kind == TokenKind::Keyword
                && DATA_TYPES.iter().any(|keyword| keyword.as_str() == token.value)
        };

        match self.tokens.get(pos) {
            Some(token) if is_data_type(token) => Ok((token.clone(), pos + 1)),
            _ => Err(self.error_at(pos, "expected data type INT or TEXT")),
        }
    }

    /**
    expression := identifier | numeric | string
     */
    pub fn parse_expression(&self, pos: usize) -> ParseResult<Expression> {
        let kinds = [TokenKind::Identifier, TokenKind::Numeric, TokenKind::String];

        for kind in kinds {
            if let Ok((token, next)) = self.match_token_kind(pos, kind) {
                return Ok((Expression::Literal(token.clone()), next));
            }
        }

        Err(self.error_at(pos, "expected expression"))
    }

    /**
    expressions := expression (, expression)*

    The list ends before the first token in `delimiters`; the delimiter is
    left for the caller.
     */
    pub fn parse_expressions(&self, start: usize, delimiters: &[Token]) -> ParseResult<Vec<Expression>> {
        self.parse_delimited(start, delimiters, Self::parse_expression)
    }

    /// Non-empty, comma-separated list of `item` ending before a delimiter
    fn parse_delimited<T>(
        &self,
        start: usize,
        delimiters: &[Token],
        item: fn(&Self, usize) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let comma = Token::symbol(Symbol::Comma);
        let mut items = vec![];
        let mut pos = start;

        loop {
            if !items.is_empty() {
                if self.tokens.get(pos).is_some_and(|token| delimiters.contains(token)) {
                    break;
                }

                if !self.expect_token(pos, &comma) {
                    let expected = delimiters.iter()
                        .map(|token| token.value.as_str())
                        .fold(String::from("expected ,"), |acc, value| acc + " or " + value);
                    return Err(self.error_at(pos, expected));
                }
                pos += 1;
            }

            let (parsed, next) = item(self, pos)?;
            items.push(parsed);
            pos = next;
        }

        Ok((items, pos))
    }

    /// Token at `pos` if it has the given kind
    pub fn match_token_kind(&self, pos: usize, kind: TokenKind) -> ParseResult<&Token> {
        match self.tokens.get(pos) {
            Some(token) if token.kind == kind => Ok((token, pos + 1)),
            _ => Err(self.error_at(pos, format!("expected {kind}"))),
        }
    }

    /// Position after `pos` if the token there equals `literal` by value and kind
    pub fn match_token_literal(&self, pos: usize, literal: &Token) -> SqlResult<usize> {
        if self.expect_token(pos, literal) {
            Ok(pos + 1)
        } else {
            Err(self.error_at(pos, format!("expected {}", literal.value)))
        }
    }

    // helper functions
    fn expect_token(&self, pos: usize, literal: &Token) -> bool {
        self.tokens.get(pos) == Some(literal)
    }

    /// Location of the token at `pos`, or of the last token past the end
    fn location_at(&self, pos: usize) -> Location {
        self.tokens.get(pos)
            .or_else(|| self.tokens.last())
            .map(|token| token.location)
            .unwrap_or_default()
    }

    /// Token index a parse error points at; end of input sorts after every token
    fn failure_position(&self, err: &SqlError, start: usize) -> usize {
        match err {
            SqlError::Parse { actual: None, .. } => self.tokens.len(),
            SqlError::Parse { location, .. } => self.tokens.iter()
                .skip(start)
                .position(|token| token.location == *location)
                .map_or(start, |offset| start + offset),
            _ => start,
        }
    }

    fn error_at(&self, pos: usize, expected: impl Into<String>) -> SqlError {
        SqlError::Parse {
            location: self.location_at(pos),
            expected: expected.into(),
            actual: self.tokens.get(pos).map(|token| token.value.clone()),
        }
    }
}

/// Lex and parse source with the default lexer tables
pub fn parse(source: &str) -> SqlResult<Ast> {
    Parser::from_source(source)?.parse()
}

pub fn parse_with_config(source: &str, config: &LexerConfig) -> SqlResult<Ast> {
    Parser::from_source_with_config(source, config)?.parse()
}
