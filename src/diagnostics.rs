//! Diagnostic definitions for the evaluators
//!
//! Runtime and static errors carry the offending token's position and text.
//! Both enums derive miette's `Diagnostic` so the CLI renders them with the
//! same reporter as every other failure.

use miette::Diagnostic;
use thiserror::Error;

use crate::lexer::Token;
use crate::types::Ty;

/// Runtime evaluation failure. The first one raised aborts the statement
/// sequence being interpreted.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("[line {line}:{col}] undefined symbol `{name}`")]
    #[diagnostic(code(skiff::runtime::undefined_symbol))]
    UndefinedSymbol { name: String, line: u32, col: u32 },

    #[error("[line {line}:{col}] at `{lexeme}`: {message}")]
    #[diagnostic(code(skiff::runtime::type_mismatch))]
    TypeMismatch {
        message: String,
        lexeme: String,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] cannot divide by zero")]
    #[diagnostic(code(skiff::runtime::division_by_zero))]
    DivisionByZero { line: u32, col: u32 },
}

impl RuntimeError {
    pub fn undefined_symbol(token: &Token) -> Self {
        RuntimeError::UndefinedSymbol {
            name: token.lexeme.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub fn type_mismatch(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch {
            message: message.into(),
            lexeme: token.lexeme.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub fn division_by_zero(token: &Token) -> Self {
        RuntimeError::DivisionByZero {
            line: token.line,
            col: token.col,
        }
    }
}

/// Static type-checker violation
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum TypeError {
    #[error("[line {line}:{col}] undefined symbol `{name}`")]
    #[diagnostic(code(skiff::typecheck::undefined_symbol))]
    UndefinedSymbol { name: String, line: u32, col: u32 },

    #[error("[line {line}:{col}] missing type annotation for `{name}`")]
    #[diagnostic(
        code(skiff::typecheck::annotation_required),
        help("declare the variable with an explicit type: `var name: float = ...`")
    )]
    MissingAnnotation { name: String, line: u32, col: u32 },

    #[error("[line {line}:{col}] `{name}` declared as `{declared}` but initialized with `{found}`")]
    #[diagnostic(code(skiff::typecheck::declaration_mismatch))]
    Declaration {
        name: String,
        declared: Ty,
        found: Ty,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] cannot assign `{found}` to `{name}` of type `{expected}`")]
    #[diagnostic(code(skiff::typecheck::assignment_mismatch))]
    Assignment {
        name: String,
        expected: Ty,
        found: Ty,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] operator `{op}` expects matching operands, found `{left}` and `{right}`")]
    #[diagnostic(code(skiff::typecheck::operand_mismatch))]
    Operand {
        op: String,
        left: Ty,
        right: Ty,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] operator `{op}` does not apply to `{found}`")]
    #[diagnostic(code(skiff::typecheck::unary_mismatch))]
    UnaryOperand {
        op: String,
        found: Ty,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] conditional branches disagree: `{then_ty}` vs `{else_ty}`")]
    #[diagnostic(code(skiff::typecheck::branch_mismatch))]
    Branch {
        then_ty: Ty,
        else_ty: Ty,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] `{found}` is not callable")]
    #[diagnostic(code(skiff::typecheck::not_callable))]
    NotCallable { found: Ty, line: u32, col: u32 },

    #[error("[line {line}:{col}] expected {expected} arguments, found {found}")]
    #[diagnostic(code(skiff::typecheck::arity_mismatch))]
    Arity {
        expected: usize,
        found: usize,
        line: u32,
        col: u32,
    },

    #[error("[line {line}:{col}] argument {index} has type `{found}`, parameter expects `{expected}`")]
    #[diagnostic(code(skiff::typecheck::argument_mismatch))]
    Argument {
        index: usize,
        expected: Ty,
        found: Ty,
        line: u32,
        col: u32,
    },
}

impl TypeError {
    pub fn undefined_symbol(token: &Token) -> Self {
        TypeError::UndefinedSymbol {
            name: token.lexeme.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub fn missing_annotation(token: &Token) -> Self {
        TypeError::MissingAnnotation {
            name: token.lexeme.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub fn operand(op: &Token, left: Ty, right: Ty) -> Self {
        TypeError::Operand {
            op: op.lexeme.clone(),
            left,
            right,
            line: op.line,
            col: op.col,
        }
    }
}
