use std::io::{Cursor, Write};

use brainfold::{
    codegen::generate,
    interpreter::{AstInterpreter, EofBehavior, Runtime},
    lexer::{FileSource, Lexer},
    parse_str,
    parser::{parser::parse, ParseError, Program, Statement},
};
use pretty_assertions::assert_eq;

const HELLO: &str =
    "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";

fn run(program: &Program, input: &[u8], eof: EofBehavior) -> Vec<u8> {
    let mut runtime = Runtime::new(Cursor::new(input.to_vec()), vec![]).with_eof(eof);
    AstInterpreter::new()
        .interpret(&mut runtime, program)
        .expect("in-memory io can't fail");
    runtime.into_output()
}

fn run_str(source: &str, input: &[u8]) -> Vec<u8> {
    let program = parse_str(source).unwrap_or_else(|e| panic!("{source:?} failed to parse: {e}"));
    run(&program, input, EofBehavior::default())
}

/// Deepest brace nesting of generated code
fn brace_depth(code: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for c in code.chars() {
        match c {
            '{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            '}' => depth -= 1,
            _ => {}
        }
    }
    assert_eq!(depth, 0, "unbalanced braces in\n{code}");
    deepest
}

#[test]
fn hello_prefix() {
    let output = run_str(HELLO, b"");
    assert!(output.starts_with(b"Hello"), "got {:?}", String::from_utf8_lossy(&output));
}

#[test]
fn echo_one_byte() {
    assert_eq!(run_str(",.", &[65]), b"A");
}

#[test]
fn echo_until_input_runs_out() {
    // with 0 on end of input, `,[.,]` copies its input exactly
    let program = parse_str(",[.,]").unwrap();
    assert_eq!(run(&program, b"brainfold", EofBehavior::Zero), b"brainfold");
}

#[test]
fn eof_leaves_the_cell_alone_by_default() {
    assert_eq!(run_str("+++,.", b""), vec![3]);
}

#[test]
fn cells_wrap_at_byte_boundaries() {
    assert_eq!(run_str("-.", b""), vec![255]);
    assert_eq!(run_str(&"+".repeat(257), b"").len(), 0);
    assert_eq!(run_str(&format!("{}.", "+".repeat(257)), b""), vec![1]);
}

#[test]
fn tape_extends_left_of_the_start() {
    assert_eq!(run_str("<<<+++++[>+<-]>.", b""), vec![5]);
}

#[test]
fn codegen_folds_a_run() {
    assert_eq!(generate(&parse_str("+++").unwrap()), "memory[current] += 3;\n");
}

#[test]
fn codegen_clear_loop() {
    assert_eq!(
        generate(&parse_str("[-]").unwrap()),
        "while (memory[current] != 0) {\n    memory[current]--;\n}\n"
    );
}

#[test]
fn loop_depth_survives_codegen() {
    for depth in 0..=10 {
        let source = format!("{}+{}", "[".repeat(depth), "]".repeat(depth));
        let program = parse_str(&source).unwrap();
        assert_eq!(program.depth(), depth);
        assert_eq!(brace_depth(&generate(&program)), depth);
    }
}

#[test]
fn unmatched_brackets_fail() {
    assert!(matches!(parse_str("]"), Err(ParseError::UnexpectedToken { .. })));
    assert!(matches!(parse_str("[+"), Err(ParseError::UnterminatedLoop { .. })));
    assert_eq!(
        parse_str("[]").unwrap().statements,
        vec![Statement::Loop(Default::default())]
    );
}

#[test]
fn file_and_text_sources_agree() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "greeting:\n{HELLO}").unwrap();

    let mut tokens = Lexer::new(FileSource::open(file.path()).unwrap()).lex();
    let from_file = parse(&mut tokens).unwrap();

    assert_eq!(from_file, parse_str(HELLO).unwrap());
}
