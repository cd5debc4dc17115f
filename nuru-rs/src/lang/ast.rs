//! Syntax tree for the built-in language.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOp::Neg => "-",
            PrefixOp::Not => "!",
        })
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Rem => "%",
            InfixOp::Eq => "==",
            InfixOp::Ne => "!=",
            InfixOp::Lt => "<",
            InfixOp::Le => "<=",
            InfixOp::Gt => ">",
            InfixOp::Ge => ">=",
            InfixOp::And => "&&",
            InfixOp::Or => "||",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Ident(String),
    Prefix { op: PrefixOp, right: Box<Expr> },
    Infix { left: Box<Expr>, op: InfixOp, right: Box<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `fanya <name> = <value>`
    Declare { name: String, value: Expr },
    /// `<name> = <value>`
    Assign { name: String, value: Expr },
    Expr(Expr),
}

/// A parsed source: the well-formed statements, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
