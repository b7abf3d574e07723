use std::fmt;
use serde::{Deserialize, Serialize};

/// Position of a character in the source text. Both fields are zero-based;
/// `Display` renders them one-based for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line + 1, self.column + 1)
    }
}

/// Scan position: byte offset into the source plus its location.
/// Scanners take a cursor by value and hand back a new one on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub location: Location,
}

impl Cursor {
    /// Step over one byte of source
    pub fn advance(self, byte: u8) -> Cursor {
        let mut location = self.location;
        if byte == b'\n' {
            location.line += 1;
            location.column = 0;
        } else if byte & 0xC0 != 0x80 {
            // utf-8 continuation bytes belong to the previous column
            location.column += 1;
        }

        Cursor { offset: self.offset + 1, location }
    }

    /// Step over `len` bytes that are known not to contain a newline
    pub fn advance_by(self, len: usize) -> Cursor {
        Cursor {
            offset: self.offset + len,
            location: Location {
                line: self.location.line,
                column: self.location.column + len,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Symbol,
    String,
    Numeric,
    Identifier,
    Bool,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::String => "string",
            TokenKind::Numeric => "numeric",
            TokenKind::Identifier => "identifier",
            TokenKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Select, From, As, Table, Create, Insert,
    Into, Values, Int, Text, Where,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "select",
            Keyword::From => "from",
            Keyword::As => "as",
            Keyword::Table => "table",
            Keyword::Create => "create",
            Keyword::Insert => "insert",
            Keyword::Into => "into",
            Keyword::Values => "values",
            Keyword::Int => "int",
            Keyword::Text => "text",
            Keyword::Where => "where",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Semicolon,  // ;
    Asterisk,   // *
    Comma,      // ,
    LeftParen,  // (
    RightParen, // )
    Concat,     // ||
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Semicolon => ";",
            Symbol::Asterisk => "*",
            Symbol::Comma => ",",
            Symbol::LeftParen => "(",
            Symbol::RightParen => ")",
            Symbol::Concat => "||",
        }
    }
}

#[derive(Debug, Clone, Eq, Serialize)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub location: Location, // where the token starts, for error reporting
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, location: Location) -> Self {
        Token { value: value.into(), kind, location }
    }

    /// Literal token used to compare against scanned keywords
    pub fn keyword(keyword: Keyword) -> Self {
        Token::new(keyword.as_str(), TokenKind::Keyword, Location::default())
    }

    /// Literal token used to compare against scanned symbols
    pub fn symbol(symbol: Symbol) -> Self {
        Token::new(symbol.as_str(), TokenKind::Symbol, Location::default())
    }
}

// tokens compare by value and kind only, never by location
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.kind == other.kind
    }
}
