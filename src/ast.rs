//! Abstract Syntax Tree for the Skiff language
//!
//! Two closed sets of node variants: expressions and statements. Nodes carry
//! the tokens needed for diagnostics (operator token, identifier token,
//! call-site parenthesis token).

use serde::{Deserialize, Serialize};

use crate::lexer::Token;
use crate::types::Ty;

/// Literal payload carried by literal tokens and expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lit {
    Num(f64),
    Str(String),
    Bool(bool),
    Char(char),
    Nil,
}

// ==================== EXPRESSIONS ====================

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Literal value
    Literal { value: Lit },
    /// Parenthesized expression
    Grouping { expr: Box<Expr> },
    /// Variable reference
    Variable { name: Token },
    /// Assignment to an existing binding
    Assign { name: Token, value: Box<Expr> },
    /// Unary operator: `-x`, `!x`
    Unary { op: Token, operand: Box<Expr> },
    /// Binary operator, including the comma operator
    Binary {
        op: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Short-circuit `and` / `or`
    Logical {
        op: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Ternary conditional: `cond ? a : b`; `question` is the `?` token
    Conditional {
        cond: Box<Expr>,
        question: Token,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// Function call; `paren` is the closing parenthesis for diagnostics
    Call {
        callee: Box<Expr>,
        paren: Token,
        args: Vec<Expr>,
    },
}

// ==================== STATEMENTS ====================

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression statement
    Expression { expr: Expr },
    /// `print expr;`
    Print { expr: Expr },
    /// `var name: type = init;` — the annotation lives on the name token
    Var { name: Token, init: Expr },
    /// `{ ... }` — a sequencing construct, not a scope boundary
    Block { statements: Vec<Stmt> },
    /// `if (cond) stmt else stmt`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `while (cond) stmt`
    While { cond: Expr, body: Box<Stmt> },
    /// `for (init; cond; incr) stmt` — all three clauses are expressions
    For {
        init: Expr,
        cond: Expr,
        incr: Expr,
        body: Box<Stmt>,
    },
    /// `fun name(params): type { ... }` — parameter annotations live on the
    /// parameter tokens
    Function {
        name: Token,
        params: Vec<Token>,
        ret: Ty,
        body: Vec<Stmt>,
    },
}
