use std::fmt::Write;

use super::{BasicBlock, Statement};

const LAST_EDGE: &str = "└── ";
const EDGE: &str = "├── ";
const LAST_INDENT: &str = "    ";
const INDENT: &str = "│   ";

/// Render the program as a tree, one node per line
pub fn pretty_print(program: &BasicBlock) -> String {
    let mut out = String::from("CompilationUnit\n");
    write_block(&mut out, program, "");
    out
}

fn write_block(out: &mut String, block: &BasicBlock, indent: &str) {
    let count = block.statements.len();
    for (i, statement) in block.statements.iter().enumerate() {
        write_statement(out, statement, indent, i + 1 == count);
    }
}

fn write_statement(out: &mut String, statement: &Statement, indent: &str, is_last: bool) {
    let edge = if is_last { LAST_EDGE } else { EDGE };
    // writing into a String can't fail
    let _ = match statement {
        Statement::ShiftLeft { by }
        | Statement::ShiftRight { by }
        | Statement::Increment { by }
        | Statement::Decrement { by } => {
            writeln!(out, "{indent}{edge}{} ({by})", statement.name())
        }
        _ => writeln!(out, "{indent}{edge}{}", statement.name()),
    };

    if let Statement::Loop(body) = statement {
        let child_indent = format!("{indent}{}", if is_last { LAST_INDENT } else { INDENT });
        write_block(out, body, &child_indent);
    }
}
