//! The built-in language: a small expression language used as the default
//! [`Pipeline`](crate::pipeline::Pipeline) by the console and script runner.
//!
//! ```rust
//! use nuru::lang::{Environment, Nuru};
//! use nuru::pipeline::{Evaluated, Pipeline};
//!
//! let nuru = Nuru;
//! let mut env: Environment = nuru.new_scope();
//! let parsed = nuru.parse("fanya x = 6; x * 7");
//! assert!(parsed.errors.is_empty());
//! let value = nuru.eval(&parsed.program, &mut env).unwrap();
//! assert_eq!(value.inspect(), "42");
//! ```

pub mod ast;
pub mod env;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::Program;
pub use env::Environment;
pub use lexer::Lexer;
pub use parser::Parser;
pub use value::Value;

use crate::pipeline::{Parsed, Pipeline};

/// The built-in pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nuru;

impl Pipeline for Nuru {
    type Scope = Environment;
    type Program = Program;
    type Value = Value;

    fn new_scope(&self) -> Environment {
        Environment::new()
    }

    fn parse(&self, source: &str) -> Parsed<Program> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            tracing::debug!(errors = parser.errors().len(), "parse failed");
        }
        Parsed { program, errors: parser.into_errors() }
    }

    fn eval(&self, program: &Program, scope: &mut Environment) -> Option<Value> {
        eval::eval(program, scope)
    }
}
