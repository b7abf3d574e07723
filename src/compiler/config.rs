use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::compiler::scanner::ScannerKind;
use crate::compiler::token::{Keyword, Symbol};
use crate::types::SqlResult;

pub const KEYWORDS: [Keyword; 11] = [
    Keyword::Select,
    Keyword::From,
    Keyword::As,
    Keyword::Table,
    Keyword::Create,
    Keyword::Insert,
    Keyword::Into,
    Keyword::Values,
    Keyword::Int,
    Keyword::Text,
    Keyword::Where,
];

/// Keywords accepted as a column type in CREATE TABLE
pub const DATA_TYPES: [Keyword; 2] = [Keyword::Int, Keyword::Text];

pub const SYMBOLS: [Symbol; 6] = [
    Symbol::Semicolon,
    Symbol::Asterisk,
    Symbol::Comma,
    Symbol::LeftParen,
    Symbol::RightParen,
    Symbol::Concat,
];

/// Order in which the lexer tries each scanner at a position
pub const SCANNER_ORDER: [ScannerKind; 5] = [
    ScannerKind::Keyword,
    ScannerKind::Symbol,
    ScannerKind::String,
    ScannerKind::Numeric,
    ScannerKind::Identifier,
];

/// Read-only tables handed to the scanner at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerConfig {
    pub keywords: Vec<Keyword>,
    pub symbols: Vec<Symbol>,
    pub scanners: Vec<ScannerKind>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            keywords: KEYWORDS.to_vec(),
            symbols: SYMBOLS.to_vec(),
            scanners: SCANNER_ORDER.to_vec(),
        }
    }
}

impl LexerConfig {
    /// Load config from a json file
    pub fn load_config(path: impl AsRef<Path>) -> SqlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str::<LexerConfig>(&text)?;
        Ok(config)
    }

    /// Write config to a json file
    pub fn save_config(&self, path: impl AsRef<Path>) -> SqlResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub(crate) fn keyword_options(&self) -> Vec<&'static str> {
        self.keywords.iter().map(Keyword::as_str).collect()
    }

    pub(crate) fn symbol_options(&self) -> Vec<&'static str> {
        self.symbols.iter().map(Symbol::as_str).collect()
    }
}
