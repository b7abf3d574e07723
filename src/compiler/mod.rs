pub mod ast;
pub mod config;
pub mod parser;
pub mod scanner;
pub mod token;
