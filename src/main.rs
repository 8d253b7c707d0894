//! Skiff CLI
//!
//! Main entry point for the `skiff` command.

use clap::{Parser, Subcommand};
use miette::Result;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skiff::check::{TypeChecker, TypeEnv};
use skiff::{Environment, Interpreter, Value};

#[derive(Parser)]
#[command(name = "skiff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The Skiff programming language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Type-check and run a Skiff source file
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Skip the static type check
        #[arg(long)]
        no_check: bool,
    },

    /// Type-check a Skiff source file without running it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the parsed AST
        #[arg(long)]
        show_ast: bool,
    },

    /// Start the interactive REPL
    Repl,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { input, no_check } => run(&input, no_check),
        Commands::Check { input, show_ast } => check(&input, show_ast),
        Commands::Repl => repl(),
    }
}

fn run(input: &std::path::Path, no_check: bool) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))?;

    let statements = skiff::parse(&source)?;
    tracing::debug!("Parsed {} statements", statements.len());

    if !no_check {
        skiff::check::check(&statements)?;
        tracing::debug!("Type check passed");
    }

    let mut interpreter = Interpreter::new();
    let result = interpreter.interpret(&statements)?;

    // Only print a non-nil final value
    match result {
        Value::Nil => {}
        other => println!("{}", other),
    }
    Ok(())
}

fn check(input: &std::path::Path, show_ast: bool) -> Result<()> {
    tracing::info!("Type-checking {:?}", input);

    let source = std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))?;

    let statements = skiff::parse(&source)?;

    if show_ast {
        println!("=== AST ===");
        let json = serde_json::to_string_pretty(&statements)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", json);
        println!();
    }

    skiff::check::check(&statements)?;

    println!("All checks passed: {}", input.display());
    Ok(())
}

fn repl() -> Result<()> {
    println!("Skiff REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :quit to exit");
    println!();

    let mut rl = rustyline::DefaultEditor::new()
        .map_err(|e| miette::miette!("Failed to initialize readline: {}", e))?;

    let mut interpreter = Interpreter::new();
    let mut checker = TypeChecker::new();
    let mut env = Environment::new();
    let mut tenv = TypeEnv::new();

    loop {
        match rl.readline("skiff> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == ":quit" || trimmed == ":q" {
                    break;
                }
                let _ = rl.add_history_entry(trimmed);

                let statements = match skiff::parse(trimmed) {
                    Ok(statements) => statements,
                    Err(report) => {
                        eprintln!("{:?}", report);
                        continue;
                    }
                };

                match checker.check_with(&statements, tenv.clone()) {
                    Ok((_, next)) => tenv = next,
                    Err(error) => {
                        eprintln!("{:?}", miette::Report::new(error));
                        continue;
                    }
                }

                match interpreter.interpret_with(&statements, env.clone()) {
                    Ok((value, next)) => {
                        env = next;
                        if value != Value::Nil {
                            println!("{}", value);
                        }
                    }
                    Err(error) => eprintln!("{:?}", miette::Report::new(error)),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {}", e);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
