extern crate clap;

use std::{
    collections::HashSet,
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use brainfold::{
    codegen::{generate, generate_program},
    interpreter::{AstInterpreter, EofBehavior, Runtime},
    lexer::{CharSource, FileSource, Lexer, TextSource},
    parser::{self, pretty::pretty_print, Program},
};
use clap::{ArgGroup, Parser, ValueEnum};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Brainf**k interpreter and C code generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["eval", "file"])))]
struct Args {
    /// Program text to run
    #[arg(short, long)]
    eval: Option<String>,

    /// Program file to run
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(value_enum, default_values_t = [Commands::Interpret])]
    commands: Vec<Commands>,

    /// What `,` stores once input runs out
    #[arg(long, value_enum, default_value_t = EofBehavior::Unchanged)]
    eof: EofBehavior,

    /// Size of the memory array in generated code
    #[arg(short, long, default_value_t = 30_000)]
    memory_size: usize,

    /// Only emit the statements, without the surrounding program
    #[arg(long)]
    body_only: bool,

    /// Write generated code here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More logging, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the tokens
    Tokens,
    /// Output the ast as a tree
    Ast,
    /// Run the program
    Interpret,
    /// Output equivalent C
    Codegen,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let commands: HashSet<Commands> = HashSet::from_iter(args.commands.iter().copied());
    if commands.contains(&Commands::Interpret) && commands.contains(&Commands::Codegen) {
        return Err("`interpret` and `codegen` can't be used in the same run".into());
    }

    let program = match (&args.eval, &args.file) {
        (Some(text), _) => {
            tracing::info!("Running inline program");
            front_end(|| Ok(TextSource::new(text)), &commands)?.0
        }
        (None, Some(path)) => {
            tracing::info!("Running {}", path.display());
            let (program, mut source) = front_end(|| FileSource::open(path), &commands)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            if let Some(e) = source.take_error() {
                return Err(format!("reading {} failed: {e}", path.display()).into());
            }
            program
        }
        (None, None) => unreachable!("clap requires a source"),
    };

    if commands.contains(&Commands::Interpret) {
        let now = Instant::now();
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut runtime = Runtime::new(stdin.lock(), stdout.lock()).with_eof(args.eof);
        AstInterpreter::new().interpret(&mut runtime, &program)?;
        tracing::info!("Finished interpreting in {:.2?}", now.elapsed());
    }

    if commands.contains(&Commands::Codegen) {
        let now = Instant::now();
        let code = if args.body_only {
            generate(&program)
        } else {
            generate_program(&program, args.memory_size)
        };
        tracing::info!("Finished codegen in {:.2?}", now.elapsed());

        match &args.output {
            Some(path) => fs::write(path, code)?,
            None => io::stdout().write_all(code.as_bytes())?,
        }
    }

    Ok(())
}

/// Lex and parse, dumping tokens and the tree along the way if asked to.
/// Hands back the source so the caller can see how reading it went.
fn front_end<S: CharSource>(
    mut open: impl FnMut() -> io::Result<S>,
    commands: &HashSet<Commands>,
) -> Result<(Program, S), Box<dyn std::error::Error>> {
    if commands.contains(&Commands::Tokens) {
        let now = Instant::now();
        let tokens = Lexer::new(open()?).collect_tokens();
        tracing::info!("Finished lexing in {:.2?}", now.elapsed());
        for token in tokens.iter() {
            println!("{:<18} {} {}", token.kind.to_string().blue(), token.value, token.span);
        }
    }

    let now = Instant::now();
    let mut tokens = Lexer::new(open()?).lex();
    let program = parser::parser::parse(&mut tokens)?;
    tracing::info!("Finished parsing in {:.2?}", now.elapsed());

    if commands.contains(&Commands::Ast) {
        print!("{}", pretty_print(&program));
    }

    Ok((program, tokens.into_lexer().into_source()))
}
