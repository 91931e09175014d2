use thiserror::Error;

use crate::lexer::{TextSpan, TokenKind};

pub mod parser;
pub mod pretty;

pub use parser::Parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `.`
    Print,
    /// `,`
    Input,

    /// A run of `<`
    ShiftLeft { by: usize },
    /// A run of `>`
    ShiftRight { by: usize },

    /// A run of `+`
    Increment { by: usize },
    /// A run of `-`
    Decrement { by: usize },

    /// `[ ... ]`, owns its body
    Loop(BasicBlock),
}

impl Statement {
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Print => "Print",
            Statement::Input => "Input",
            Statement::ShiftLeft { .. } => "ShiftLeft",
            Statement::ShiftRight { .. } => "ShiftRight",
            Statement::Increment { .. } => "Increment",
            Statement::Decrement { .. } => "Decrement",
            Statement::Loop(_) => "Loop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicBlock {
    pub statements: Vec<Statement>,
}

impl BasicBlock {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// How deeply loops nest inside this block, 0 if there are none
    pub fn depth(&self) -> usize {
        self.statements
            .iter()
            .map(|statement| match statement {
                Statement::Loop(body) => body.depth() + 1,
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

/// The top level block
pub type Program = BasicBlock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected {kind} ({value:?}) at {span}, expected a statement")]
    UnexpectedToken {
        kind: TokenKind,
        value: char,
        span: TextSpan,
    },

    #[error("loop opened at {opened_at} is never closed, input ended at {span}")]
    UnterminatedLoop { opened_at: TextSpan, span: TextSpan },
}
