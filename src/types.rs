use std::io;
use thiserror::Error;
use crate::compiler::token::Location;

// global types
pub type SqlResult<T> = Result<T, SqlError>;

#[derive(Error, Debug)]
pub enum SqlError {
    /// No scanner could consume the character at `location`
    #[error("[{location}]: unable to lex token{}", .hint.as_ref().map(|h| format!(" after {h}")).unwrap_or_default())]
    Lex {
        location: Location,
        hint: Option<String>,
    },

    /// Token stream did not match any statement form
    #[error("[{location}]: {expected}, got: {}", .actual.as_deref().unwrap_or("end of input"))]
    Parse {
        location: Location,
        expected: String,
        actual: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid lexer config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SqlError {
    /// Source location for lex and parse failures
    pub fn location(&self) -> Option<Location> {
        match self {
            SqlError::Lex { location, .. } | SqlError::Parse { location, .. } => Some(*location),
            _ => None,
        }
    }
}
