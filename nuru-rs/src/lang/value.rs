//! Runtime values of the built-in language.

use std::fmt;

use crate::pipeline::Evaluated;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    /// A runtime fault.  Carried as a value; the front end prints it like any
    /// other result.
    Error(String),
}

impl Value {
    pub const INTEGER: &'static str = "NAMBA";
    pub const FLOAT: &'static str = "DESIMALI";
    pub const STRING: &'static str = "NENO";
    pub const BOOLEAN: &'static str = "BOOLEAN";
    pub const NULL: &'static str = "TUPU";
    pub const ERROR: &'static str = "KOSA";

    pub fn error(msg: impl Into<String>) -> Self {
        Value::Error(msg.into())
    }

    /// `tupu` and `sikweli` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => {
                if x.fract() == 0.0 && x.abs() < 1e15 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Value::Str(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("kweli"),
            Value::Bool(false) => f.write_str("sikweli"),
            Value::Null => f.write_str("tupu"),
            Value::Error(msg) => write!(f, "Kosa: {msg}"),
        }
    }
}

impl Evaluated for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => Self::INTEGER,
            Value::Float(_) => Self::FLOAT,
            Value::Str(_) => Self::STRING,
            Value::Bool(_) => Self::BOOLEAN,
            Value::Null => Self::NULL,
            Value::Error(_) => Self::ERROR,
        }
    }

    fn inspect(&self) -> String {
        self.to_string()
    }

    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
