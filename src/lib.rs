extern crate thiserror;

pub mod codegen;
pub mod interpreter;
pub mod lexer;
pub mod parser;

use lexer::{Lexer, TextSource};
use parser::{ParseError, Program};

/// Lex and parse an in-memory program
pub fn parse_str(text: &str) -> Result<Program, ParseError> {
    let mut tokens = Lexer::new(TextSource::new(text)).lex();
    parser::parser::parse(&mut tokens)
}
