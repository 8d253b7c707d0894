//! Static type checker for the Skiff language
//!
//! An independent pass over the same AST the interpreter walks, threading a
//! type environment with the identical binding discipline: declarations
//! extend the chain, blocks hand their grown chain to the statements that
//! follow, branch and loop bodies check against the current chain and their
//! extensions are discarded. The checker never consults runtime values.

use crate::ast::{Expr, Lit, Stmt};
use crate::diagnostics::TypeError;
use crate::env::Env;
use crate::lexer::TokenKind;
use crate::types::Ty;

/// The type environment: names bound to static types
pub type TypeEnv = Env<Ty>;

/// Type check a statement sequence against a fresh global environment
pub fn check(statements: &[Stmt]) -> Result<(), TypeError> {
    let mut checker = TypeChecker::new();
    checker.check(statements)?;
    Ok(())
}

/// Static type checker
pub struct TypeChecker {}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {}
    }

    /// Check a statement sequence with a fresh global environment
    pub fn check(&mut self, statements: &[Stmt]) -> Result<Ty, TypeError> {
        let (ty, _) = self.check_with(statements, TypeEnv::new())?;
        Ok(ty)
    }

    /// Check a statement sequence against an existing environment and
    /// return the environment to continue from (used by the REPL).
    pub fn check_with(
        &mut self,
        statements: &[Stmt],
        mut env: TypeEnv,
    ) -> Result<(Ty, TypeEnv), TypeError> {
        let mut last = Ty::Void;
        for stmt in statements {
            let (ty, next) = self.check_stmt(stmt, env)?;
            last = ty;
            env = next;
        }
        Ok((last, env))
    }

    /// Check one statement, returning its type and the environment for the
    /// next statement.
    fn check_stmt(&mut self, stmt: &Stmt, env: TypeEnv) -> Result<(Ty, TypeEnv), TypeError> {
        match stmt {
            Stmt::Expression { expr } => {
                let ty = self.check_expr(expr, &env)?;
                Ok((ty, env))
            }

            Stmt::Print { expr } => {
                self.check_expr(expr, &env)?;
                Ok((Ty::Void, env))
            }

            Stmt::Var { name, init } => {
                let declared = name
                    .ty
                    .clone()
                    .ok_or_else(|| TypeError::missing_annotation(name))?;
                let found = self.check_expr(init, &env)?;
                if found != declared {
                    return Err(TypeError::Declaration {
                        name: name.lexeme.clone(),
                        declared,
                        found,
                        line: name.line,
                        col: name.col,
                    });
                }
                let env = env.define(&name.lexeme, declared);
                Ok((Ty::Void, env))
            }

            Stmt::Block { statements } => {
                let mut env = env;
                let mut last = Ty::Void;
                for s in statements {
                    let (ty, next) = self.check_stmt(s, env)?;
                    last = ty;
                    env = next;
                }
                Ok((last, env))
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_expr(cond, &env)?;
                self.check_stmt(then_branch, env.clone())?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch, env.clone())?;
                }
                Ok((Ty::Void, env))
            }

            Stmt::While { cond, body } => {
                self.check_expr(cond, &env)?;
                self.check_stmt(body, env.clone())?;
                Ok((Ty::Void, env))
            }

            Stmt::For {
                init,
                cond,
                incr,
                body,
            } => {
                self.check_expr(init, &env)?;
                self.check_expr(cond, &env)?;
                self.check_stmt(body, env.clone())?;
                self.check_expr(incr, &env)?;
                Ok((Ty::Void, env))
            }

            Stmt::Function {
                name,
                params,
                ret,
                body,
            } => {
                let param_types: Vec<Ty> = params
                    .iter()
                    .map(|p| {
                        p.ty.clone()
                            .ok_or_else(|| TypeError::missing_annotation(p))
                    })
                    .collect::<Result<_, _>>()?;
                let fn_ty = Ty::Fn {
                    params: param_types.clone(),
                    ret: Box::new(ret.clone()),
                };

                // The signature is bound under the function's name; the
                // body checks against that chain extended with the
                // parameters, mirroring the interpreter's closure capture.
                let env = env.define(&name.lexeme, fn_ty.clone());
                let mut body_env = env.clone();
                for (param, ty) in params.iter().zip(&param_types) {
                    body_env = body_env.define(&param.lexeme, ty.clone());
                }
                for stmt in body {
                    let (_, next) = self.check_stmt(stmt, body_env)?;
                    body_env = next;
                }

                Ok((fn_ty, env))
            }
        }
    }

    /// Compute the type of an expression
    fn check_expr(&mut self, expr: &Expr, env: &TypeEnv) -> Result<Ty, TypeError> {
        match expr {
            Expr::Literal { value } => Ok(lit_ty(value)),

            Expr::Grouping { expr } => self.check_expr(expr, env),

            Expr::Variable { name } => env
                .get(&name.lexeme)
                .ok_or_else(|| TypeError::undefined_symbol(name)),

            Expr::Assign { name, value } => {
                let found = self.check_expr(value, env)?;
                let expected = env
                    .get(&name.lexeme)
                    .ok_or_else(|| TypeError::undefined_symbol(name))?;
                if found != expected {
                    return Err(TypeError::Assignment {
                        name: name.lexeme.clone(),
                        expected,
                        found,
                        line: name.line,
                        col: name.col,
                    });
                }
                Ok(found)
            }

            Expr::Unary { op, operand } => {
                let ty = self.check_expr(operand, env)?;
                match op.kind {
                    TokenKind::Minus => {
                        if ty != Ty::Float {
                            return Err(TypeError::UnaryOperand {
                                op: op.lexeme.clone(),
                                found: ty,
                                line: op.line,
                                col: op.col,
                            });
                        }
                        Ok(Ty::Float)
                    }
                    // Logical negation is defined on every value through
                    // truthiness; the result is always boolean.
                    _ => Ok(Ty::Bool),
                }
            }

            Expr::Logical { op, left, right } => {
                let left = self.check_expr(left, env)?;
                let right = self.check_expr(right, env)?;
                if left != right {
                    return Err(TypeError::operand(op, left, right));
                }
                Ok(left)
            }

            Expr::Conditional {
                cond,
                question,
                then_branch,
                else_branch,
            } => {
                self.check_expr(cond, env)?;
                let then_ty = self.check_expr(then_branch, env)?;
                let else_ty = self.check_expr(else_branch, env)?;
                if then_ty != else_ty {
                    return Err(TypeError::Branch {
                        then_ty,
                        else_ty,
                        line: question.line,
                        col: question.col,
                    });
                }
                Ok(then_ty)
            }

            Expr::Binary { op, left, right } => {
                let left = self.check_expr(left, env)?;
                let right = self.check_expr(right, env)?;
                match op.kind {
                    TokenKind::Plus => {
                        if left.is_textual() || right.is_textual() {
                            Ok(Ty::Str)
                        } else if left.is_numeric() && right.is_numeric() {
                            Ok(Ty::Float)
                        } else {
                            Err(TypeError::operand(op, left, right))
                        }
                    }
                    TokenKind::Minus | TokenKind::Star | TokenKind::Slash => {
                        // Operands must share one non-textual type; the
                        // result keeps that operand type.
                        if left == right && !left.is_textual() {
                            Ok(left)
                        } else {
                            Err(TypeError::operand(op, left, right))
                        }
                    }
                    TokenKind::Gt | TokenKind::Ge | TokenKind::Lt | TokenKind::Le => {
                        // Same operand rule as arithmetic; the result of a
                        // comparison is always boolean.
                        if left == right && !left.is_textual() {
                            Ok(Ty::Bool)
                        } else {
                            Err(TypeError::operand(op, left, right))
                        }
                    }
                    TokenKind::EqEq | TokenKind::Ne => {
                        if left == right {
                            Ok(Ty::Bool)
                        } else {
                            Err(TypeError::operand(op, left, right))
                        }
                    }
                    TokenKind::Comma => Ok(right),
                    _ => Err(TypeError::operand(op, left, right)),
                }
            }

            Expr::Call {
                callee,
                paren,
                args,
            } => {
                let callee_ty = self.check_expr(callee, env)?;
                let (params, ret) = match callee_ty {
                    Ty::Fn { params, ret } => (params, ret),
                    other => {
                        return Err(TypeError::NotCallable {
                            found: other,
                            line: paren.line,
                            col: paren.col,
                        });
                    }
                };
                if args.len() != params.len() {
                    return Err(TypeError::Arity {
                        expected: params.len(),
                        found: args.len(),
                        line: paren.line,
                        col: paren.col,
                    });
                }
                for (index, (arg, param)) in args.iter().zip(&params).enumerate() {
                    let found = self.check_expr(arg, env)?;
                    if found != *param {
                        return Err(TypeError::Argument {
                            index: index + 1,
                            expected: param.clone(),
                            found,
                            line: paren.line,
                            col: paren.col,
                        });
                    }
                }
                Ok(*ret)
            }
        }
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn lit_ty(lit: &Lit) -> Ty {
    match lit {
        Lit::Num(_) => Ty::Float,
        Lit::Str(_) => Ty::Str,
        Lit::Bool(_) => Ty::Bool,
        Lit::Char(_) => Ty::Char,
        Lit::Nil => Ty::Void,
    }
}
