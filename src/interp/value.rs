//! Runtime values for the interpreter

use std::fmt;
use std::rc::Rc;

use crate::ast::{Lit, Stmt};
use crate::env::Env;
use crate::lexer::Token;
use crate::types::Ty;

/// The value environment: names bound to runtime values
pub type Environment = Env<Value>;

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// The null value `nil`
    Nil,
    /// Boolean
    Bool(bool),
    /// 64-bit float (the only numeric representation)
    Num(f64),
    /// String
    Str(String),
    /// Character
    Char(char),
    /// Function closure
    Fn(Rc<Function>),
}

/// A function value: the declaration plus the environment captured when the
/// declaration executed.
///
/// The closure is fixed once, at declaration time, and includes the
/// function's own binding cell (direct recursion resolves by name) and
/// nil-prebound parameter cells. Argument values are bound per call by
/// extending fresh frames on top of this chain, so recursive calls never
/// share parameter bindings.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<Token>,
    pub param_types: Vec<Ty>,
    pub ret: Ty,
    pub body: Vec<Stmt>,
    pub closure: Environment,
}

impl Value {
    pub fn from_lit(lit: &Lit) -> Value {
        match lit {
            Lit::Num(n) => Value::Num(*n),
            Lit::Str(s) => Value::Str(s.clone()),
            Lit::Bool(b) => Value::Bool(*b),
            Lit::Char(c) => Value::Char(*c),
            Lit::Nil => Value::Nil,
        }
    }

    /// `nil` and `false` are falsy; every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Num(_) => "float",
            Value::Str(_) => "string",
            Value::Char(_) => "char",
            Value::Fn(_) => "function",
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Canonical textual form: numbers drop a trailing `.0`, `nil` prints
    /// as the literal string "nil".
    pub fn stringify(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Num(n) => {
                let text = format!("{}", n);
                match text.strip_suffix(".0") {
                    Some(trimmed) => trimmed.to_string(),
                    None => text,
                }
            }
            Value::Str(s) => s.clone(),
            Value::Char(c) => c.to_string(),
            Value::Fn(f) => format!("<fn {}>", f.name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

impl PartialEq for Value {
    /// Structural equality; `nil` equals only `nil`, functions compare by
    /// identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Fn(a), Value::Fn(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
