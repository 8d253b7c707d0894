//! Tree-walking interpreter for the Skiff AST
//!
//! Evaluates statement sequences directly, threading a persistent
//! environment chain.

pub mod eval;
pub mod value;

pub use eval::Interpreter;
pub use value::{Environment, Function, Value};
