//! Static types for the Skiff language

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Skiff static type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ty {
    /// 64-bit float (the only numeric type)
    Float,
    /// String
    Str,
    /// Boolean
    Bool,
    /// Character
    Char,
    /// Null/void (the type of `nil` and of value-less statements)
    Void,
    /// Function signature: fn(params) -> ret
    Fn { params: Vec<Ty>, ret: Box<Ty> },
}

impl Ty {
    /// Resolve a type annotation name. `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Ty> {
        match name {
            "float" => Some(Ty::Float),
            "string" => Some(Ty::Str),
            "bool" => Some(Ty::Bool),
            "char" => Some(Ty::Char),
            "void" => Some(Ty::Void),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Ty::Float)
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, Ty::Str)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Float => write!(f, "float"),
            Ty::Str => write!(f, "string"),
            Ty::Bool => write!(f, "bool"),
            Ty::Char => write!(f, "char"),
            Ty::Void => write!(f, "void"),
            Ty::Fn { params, ret } => {
                write!(f, "fn(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") -> {}", ret)
            }
        }
    }
}
