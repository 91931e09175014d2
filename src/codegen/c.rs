use std::fmt::Write;

use crate::parser::{BasicBlock, Program, Statement};

use super::CodeGen;

pub(super) const INDENT: &str = "    ";

/// Emits C-like statements over a `memory` byte array indexed by `current`.
/// No bounds checks are emitted.
#[derive(Debug, Default)]
pub struct CGen {
    builder: String,
    indent_level: usize,
}

impl CodeGen for CGen {
    fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, program: &Program) {
        self.write_block(program);
    }

    fn output(&self) -> &str {
        &self.builder
    }
}

impl CGen {
    pub fn with_indent_level(mut self, indent_level: usize) -> Self {
        self.indent_level = indent_level;
        self
    }

    pub fn into_output(self) -> String {
        self.builder
    }

    fn write_block(&mut self, block: &BasicBlock) {
        for statement in block.statements.iter() {
            match statement {
                Statement::Print => self.line(format_args!("putchar(memory[current]);")),
                Statement::Input => self.line(format_args!("memory[current] = getchar();")),
                Statement::ShiftLeft { by: 1 } => self.line(format_args!("current--;")),
                Statement::ShiftLeft { by } => self.line(format_args!("current -= {by};")),
                Statement::ShiftRight { by: 1 } => self.line(format_args!("current++;")),
                Statement::ShiftRight { by } => self.line(format_args!("current += {by};")),
                Statement::Increment { by: 1 } => self.line(format_args!("memory[current]++;")),
                Statement::Increment { by } => {
                    self.line(format_args!("memory[current] += {by};"))
                }
                Statement::Decrement { by: 1 } => self.line(format_args!("memory[current]--;")),
                Statement::Decrement { by } => {
                    self.line(format_args!("memory[current] -= {by};"))
                }
                Statement::Loop(body) => {
                    self.line(format_args!("while (memory[current] != 0) {{"));
                    self.indent_level += 1;
                    self.write_block(body);
                    self.indent_level -= 1;
                    self.line(format_args!("}}"));
                }
            }
        }
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        for _ in 0..self.indent_level {
            self.builder.push_str(INDENT);
        }
        // writing into a String can't fail
        let _ = self.builder.write_fmt(text);
        self.builder.push('\n');
    }
}
