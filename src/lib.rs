//! Skiff Programming Language
//!
//! A small statically-typed scripting language with a tree-walking
//! interpreter and a companion static type checker. The two evaluators walk
//! the same AST with the same binding discipline: a persistent,
//! structurally-shared environment chain in which definition is functional
//! (a new chain head per declaration) and assignment is destructive on the
//! shared binding cell.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → AST → { TypeChecker, Interpreter }
//! ```
//!
//! # Example
//!
//! ```skiff
//! var total: float = 0;
//! for (total = 0; total < 10; total = total + 1) {
//!     print total;
//! }
//!
//! fun scale(x: float, factor: float): float {
//!     x * factor;
//! }
//! print scale(2, 21);
//! ```

pub mod ast;
pub mod check;
pub mod diagnostics;
pub mod env;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod types;

// Re-exports for convenience
pub use ast::{Expr, Lit, Stmt};
pub use diagnostics::{RuntimeError, TypeError};
pub use interp::{Environment, Interpreter, Value};
pub use lexer::{Token, TokenKind};
pub use types::Ty;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse source code to a statement list
pub fn parse(source: &str) -> miette::Result<Vec<Stmt>> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}

/// Type-check source code without executing it
pub fn typecheck(source: &str) -> miette::Result<()> {
    let statements = parse(source)?;
    check::check(&statements)?;
    Ok(())
}

/// Interpret source code directly (no type check), yielding the last
/// executed statement's value
pub fn interpret(source: &str) -> miette::Result<Value> {
    let statements = parse(source)?;
    let mut interpreter = Interpreter::new();
    Ok(interpreter.interpret(&statements)?)
}

/// Type-check, then interpret: the normal execution pipeline
pub fn run(source: &str) -> miette::Result<Value> {
    let statements = parse(source)?;
    check::check(&statements)?;
    let mut interpreter = Interpreter::new();
    Ok(interpreter.interpret(&statements)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn pipeline_runs_checked_program() {
        let value = run("var x: float = 2; x * 21;").unwrap();
        assert_eq!(value, Value::Num(42.0));
    }
}
