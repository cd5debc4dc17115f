//! Tree-walking evaluator for the built-in language.
//!
//! Runtime faults are returned as [`Value::Error`]; the first one stops the
//! program and becomes its result.

use super::ast::{Expr, InfixOp, PrefixOp, Program, Stmt};
use super::env::Environment;
use super::value::Value;
use crate::pipeline::Evaluated;

/// Largest string (in bytes) that repetition may produce.
const MAX_STRING_LEN: usize = 1 << 24;

/// Evaluate `program` in `env`.
///
/// Returns the value of the last statement, or `None` when that statement
/// only bound a name (or the program is empty).
pub fn eval(program: &Program, env: &mut Environment) -> Option<Value> {
    let mut result = None;
    for stmt in &program.statements {
        result = eval_stmt(stmt, env);
        if matches!(result, Some(Value::Error(_))) {
            break;
        }
    }
    result
}

fn eval_stmt(stmt: &Stmt, env: &mut Environment) -> Option<Value> {
    match stmt {
        Stmt::Declare { name, value } => {
            let v = eval_expr(value, env);
            if v.is_error() {
                return Some(v);
            }
            env.set(name.clone(), v);
            None
        }
        Stmt::Assign { name, value } => {
            if !env.contains(name) {
                return Some(Value::error(format!(
                    "cannot assign to undeclared '{name}' (use 'fanya {name} = …')"
                )));
            }
            let v = eval_expr(value, env);
            if v.is_error() {
                return Some(v);
            }
            env.set(name.clone(), v);
            None
        }
        Stmt::Expr(expr) => Some(eval_expr(expr, env)),
    }
}

pub fn eval_expr(expr: &Expr, env: &Environment) -> Value {
    match expr {
        Expr::Int(n) => Value::Int(*n),
        Expr::Float(x) => Value::Float(*x),
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Null => Value::Null,
        Expr::Ident(name) => env
            .get(name)
            .cloned()
            .unwrap_or_else(|| Value::error(format!("unknown identifier: {name}"))),
        Expr::Prefix { op, right } => {
            let right = eval_expr(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix(*op, right)
        }
        Expr::Infix { left, op: op @ (InfixOp::And | InfixOp::Or), right } => {
            let left = eval_expr(left, env);
            if left.is_error() {
                return left;
            }
            let short = match op {
                InfixOp::And => !left.is_truthy(),
                _ => left.is_truthy(),
            };
            if short {
                return Value::Bool(left.is_truthy());
            }
            let right = eval_expr(right, env);
            if right.is_error() {
                return right;
            }
            Value::Bool(right.is_truthy())
        }
        Expr::Infix { left, op, right } => {
            let left = eval_expr(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expr(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix(*op, left, right)
        }
    }
}

fn eval_prefix(op: PrefixOp, right: Value) -> Value {
    match (op, right) {
        (PrefixOp::Not, v) => Value::Bool(!v.is_truthy()),
        (PrefixOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map_or_else(|| Value::error("integer overflow"), Value::Int),
        (PrefixOp::Neg, Value::Float(x)) => Value::Float(-x),
        (PrefixOp::Neg, v) => Value::error(format!("unknown operator: -{}", type_of(&v))),
    }
}

fn type_of(v: &Value) -> &'static str {
    v.type_name()
}

fn eval_infix(op: InfixOp, left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_infix(op, a, b),
        (Value::Int(a), Value::Float(b)) => float_infix(op, a as f64, b),
        (Value::Float(a), Value::Int(b)) => float_infix(op, a, b as f64),
        (Value::Float(a), Value::Float(b)) => float_infix(op, a, b),
        (Value::Str(a), Value::Str(b)) => str_infix(op, &a, &b),
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) if op == InfixOp::Mul => {
            match usize::try_from(n) {
                Ok(count) if s.len().checked_mul(count).is_some_and(|len| len <= MAX_STRING_LEN) => {
                    Value::Str(s.repeat(count))
                }
                Ok(_) => Value::error("string too long"),
                Err(_) => Value::error("cannot repeat a string a negative number of times"),
            }
        }
        (l, r) => match op {
            InfixOp::Eq => Value::Bool(l == r),
            InfixOp::Ne => Value::Bool(l != r),
            _ => Value::error(format!("type mismatch: {} {op} {}", type_of(&l), type_of(&r))),
        },
    }
}

fn int_infix(op: InfixOp, a: i64, b: i64) -> Value {
    let checked = |r: Option<i64>| r.map_or_else(|| Value::error("integer overflow"), Value::Int);
    match op {
        InfixOp::Add => checked(a.checked_add(b)),
        InfixOp::Sub => checked(a.checked_sub(b)),
        InfixOp::Mul => checked(a.checked_mul(b)),
        InfixOp::Div if b == 0 => Value::error("division by zero"),
        InfixOp::Div => match a.checked_rem(b) {
            Some(0) => checked(a.checked_div(b)),
            Some(_) => Value::Float(a as f64 / b as f64),
            None => Value::error("integer overflow"),
        },
        InfixOp::Rem if b == 0 => Value::error("division by zero"),
        InfixOp::Rem => checked(a.checked_rem(b)),
        InfixOp::Eq => Value::Bool(a == b),
        InfixOp::Ne => Value::Bool(a != b),
        InfixOp::Lt => Value::Bool(a < b),
        InfixOp::Le => Value::Bool(a <= b),
        InfixOp::Gt => Value::Bool(a > b),
        InfixOp::Ge => Value::Bool(a >= b),
        InfixOp::And | InfixOp::Or => Value::error(format!("unknown operator: NAMBA {op} NAMBA")),
    }
}

fn float_infix(op: InfixOp, a: f64, b: f64) -> Value {
    match op {
        InfixOp::Add => Value::Float(a + b),
        InfixOp::Sub => Value::Float(a - b),
        InfixOp::Mul => Value::Float(a * b),
        InfixOp::Div if b == 0.0 => Value::error("division by zero"),
        InfixOp::Div => Value::Float(a / b),
        InfixOp::Rem if b == 0.0 => Value::error("division by zero"),
        InfixOp::Rem => Value::Float(a % b),
        InfixOp::Eq => Value::Bool(a == b),
        InfixOp::Ne => Value::Bool(a != b),
        InfixOp::Lt => Value::Bool(a < b),
        InfixOp::Le => Value::Bool(a <= b),
        InfixOp::Gt => Value::Bool(a > b),
        InfixOp::Ge => Value::Bool(a >= b),
        InfixOp::And | InfixOp::Or => {
            Value::error(format!("unknown operator: DESIMALI {op} DESIMALI"))
        }
    }
}

fn str_infix(op: InfixOp, a: &str, b: &str) -> Value {
    match op {
        InfixOp::Add => Value::Str(format!("{a}{b}")),
        InfixOp::Eq => Value::Bool(a == b),
        InfixOp::Ne => Value::Bool(a != b),
        InfixOp::Lt => Value::Bool(a < b),
        InfixOp::Le => Value::Bool(a <= b),
        InfixOp::Gt => Value::Bool(a > b),
        InfixOp::Ge => Value::Bool(a >= b),
        _ => Value::error(format!("unknown operator: NENO {op} NENO")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
