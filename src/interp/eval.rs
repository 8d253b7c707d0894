//! Tree-walking interpreter
//!
//! Statement execution threads an explicit environment: each statement takes
//! the current chain and returns the (possibly extended) chain the next
//! statement runs against. Variable declarations grow the chain; block
//! statements pass the grown chain on to the statements that follow them;
//! branch and loop bodies run against the current chain and their extensions
//! are discarded.

use std::rc::Rc;

use crate::ast::{Expr, Stmt};
use crate::diagnostics::RuntimeError;
use crate::lexer::{Token, TokenKind};
use crate::types::Ty;

use super::value::{Environment, Function, Value};

/// Tree-walking interpreter
pub struct Interpreter {
    /// Lines written by `print`, captured for testing
    output: Vec<String>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter { output: Vec::new() }
    }

    /// Get captured print output (for testing)
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Clear the captured output buffer
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Execute a statement sequence against a fresh global environment,
    /// yielding the last executed statement's value.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<Value, RuntimeError> {
        let (value, _) = self.interpret_with(statements, Environment::new())?;
        Ok(value)
    }

    /// Execute a statement sequence against an existing environment and
    /// return the environment to continue from (used by the REPL).
    pub fn interpret_with(
        &mut self,
        statements: &[Stmt],
        mut env: Environment,
    ) -> Result<(Value, Environment), RuntimeError> {
        let mut last = Value::Nil;
        for stmt in statements {
            let (value, next) = self.execute(stmt, env)?;
            last = value;
            env = next;
        }
        Ok((last, env))
    }

    /// Execute one statement, returning its value and the environment for
    /// the next statement.
    fn execute(
        &mut self,
        stmt: &Stmt,
        env: Environment,
    ) -> Result<(Value, Environment), RuntimeError> {
        match stmt {
            Stmt::Expression { expr } => {
                let value = self.evaluate(expr, &env)?;
                Ok((value, env))
            }

            Stmt::Print { expr } => {
                let value = self.evaluate(expr, &env)?;
                let line = value.stringify();
                println!("{}", line);
                self.output.push(line);
                Ok((Value::Nil, env))
            }

            Stmt::Var { name, init } => {
                let value = self.evaluate(init, &env)?;
                let env = env.define(&name.lexeme, value);
                Ok((Value::Nil, env))
            }

            // A block is a sequencing construct, not a scope boundary: the
            // chain it grows is handed to whatever follows it.
            Stmt::Block { statements } => {
                let mut env = env;
                let mut last = Value::Nil;
                for s in statements {
                    let (value, next) = self.execute(s, env)?;
                    last = value;
                    env = next;
                }
                Ok((last, env))
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(cond, &env)?.is_truthy() {
                    let (value, _) = self.execute(then_branch, env.clone())?;
                    Ok((value, env))
                } else if let Some(else_branch) = else_branch {
                    let (value, _) = self.execute(else_branch, env.clone())?;
                    Ok((value, env))
                } else {
                    Ok((Value::Nil, env))
                }
            }

            Stmt::While { cond, body } => {
                while self.evaluate(cond, &env)?.is_truthy() {
                    self.execute(body, env.clone())?;
                }
                Ok((Value::Nil, env))
            }

            Stmt::For {
                init,
                cond,
                incr,
                body,
            } => {
                self.evaluate(init, &env)?;
                while self.evaluate(cond, &env)?.is_truthy() {
                    self.execute(body, env.clone())?;
                    self.evaluate(incr, &env)?;
                }
                Ok((Value::Nil, env))
            }

            Stmt::Function {
                name,
                params,
                ret,
                body,
            } => {
                // The closure must contain the function's own cell, so bind
                // a placeholder first and assign the finished value through
                // the shared cell afterwards.
                let env = env.define(&name.lexeme, Value::Nil);
                let mut closure = env.clone();
                for param in params {
                    closure = closure.define(&param.lexeme, Value::Nil);
                }
                let param_types: Vec<Ty> = params
                    .iter()
                    .map(|p| p.ty.clone().unwrap_or(Ty::Void))
                    .collect();
                let function = Value::Fn(Rc::new(Function {
                    name: name.lexeme.clone(),
                    params: params.clone(),
                    param_types,
                    ret: ret.clone(),
                    body: body.clone(),
                    closure,
                }));
                env.assign(&name.lexeme, function.clone());
                Ok((function, env))
            }
        }
    }

    /// Evaluate an expression to a value
    fn evaluate(&mut self, expr: &Expr, env: &Environment) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal { value } => Ok(Value::from_lit(value)),

            Expr::Grouping { expr } => self.evaluate(expr, env),

            Expr::Variable { name } => env
                .get(&name.lexeme)
                .ok_or_else(|| RuntimeError::undefined_symbol(name)),

            Expr::Assign { name, value } => {
                let value = self.evaluate(value, env)?;
                if !env.assign(&name.lexeme, value.clone()) {
                    return Err(RuntimeError::undefined_symbol(name));
                }
                Ok(value)
            }

            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand, env)?;
                match op.kind {
                    TokenKind::Minus => {
                        let n = value.as_num().ok_or_else(|| {
                            RuntimeError::type_mismatch(op, "operand must be a number")
                        })?;
                        Ok(Value::Num(-n))
                    }
                    TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
                    _ => Err(RuntimeError::type_mismatch(op, "unsupported unary operator")),
                }
            }

            Expr::Logical { op, left, right } => {
                let left = self.evaluate(left, env)?;
                if op.kind == TokenKind::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate(right, env)
            }

            Expr::Conditional {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate(cond, env)?.is_truthy() {
                    self.evaluate(then_branch, env)
                } else {
                    self.evaluate(else_branch, env)
                }
            }

            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                self.binary(op, left, right)
            }

            Expr::Call {
                callee,
                paren,
                args,
            } => {
                let callee = self.evaluate(callee, env)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.evaluate(arg, env)?);
                }
                match callee {
                    Value::Fn(function) => self.call(&function, arg_values, paren),
                    other => Err(RuntimeError::type_mismatch(
                        paren,
                        format!("can only call functions, found {}", other.type_name()),
                    )),
                }
            }
        }
    }

    /// Evaluate a binary operation
    fn binary(&self, op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
        match op.kind {
            TokenKind::Plus => match (&left, &right) {
                (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!(
                    "{}{}",
                    left.stringify(),
                    right.stringify()
                ))),
                (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
                _ => Err(RuntimeError::type_mismatch(
                    op,
                    "addition not supported for these operands",
                )),
            },
            TokenKind::Minus => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                Ok(Value::Num(a - b))
            }
            TokenKind::Star => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                Ok(Value::Num(a * b))
            }
            TokenKind::Slash => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                if b == 0.0 {
                    return Err(RuntimeError::division_by_zero(op));
                }
                Ok(Value::Num(a / b))
            }
            TokenKind::Gt => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::Ge => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                Ok(Value::Bool(a >= b))
            }
            TokenKind::Lt => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::Le => {
                let (a, b) = numeric_operands(op, &left, &right)?;
                Ok(Value::Bool(a <= b))
            }
            TokenKind::EqEq => Ok(Value::Bool(left == right)),
            TokenKind::Ne => Ok(Value::Bool(left != right)),
            TokenKind::Comma => Ok(right),
            _ => Err(RuntimeError::type_mismatch(op, "unsupported binary operator")),
        }
    }

    /// Invoke a function: arity check, then a fresh parameter frame per call
    /// extended from the captured closure. The result is the last executed
    /// body statement's value.
    fn call(
        &mut self,
        function: &Function,
        args: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::type_mismatch(
                paren,
                format!(
                    "expected {} arguments, found {}",
                    function.params.len(),
                    args.len()
                ),
            ));
        }

        let mut env = function.closure.clone();
        for (param, arg) in function.params.iter().zip(args) {
            env = env.define(&param.lexeme, arg);
        }

        let mut result = Value::Nil;
        for stmt in &function.body {
            let (value, next) = self.execute(stmt, env)?;
            result = value;
            env = next;
        }
        Ok(result)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_operands(op: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left.as_num(), right.as_num()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::type_mismatch(op, "operands must be numbers")),
    }
}
