//! The interpreter pipeline consumed by the console and the script runner.
//!
//! Lexing, parsing and evaluation sit behind [`Pipeline`] so the front end
//! never depends on a particular language implementation.  The crate ships
//! one implementation, [`crate::lang::Nuru`].

/// An evaluated value as seen by the front end: a type tag and a printable
/// representation.  Runtime faults are values too; they are printed like any
/// other result.
pub trait Evaluated {
    /// The value's type tag.
    fn type_name(&self) -> &'static str;

    /// Human-readable representation, printed by the console.
    fn inspect(&self) -> String;

    /// `true` for the null tag, whose results are never printed.
    fn is_null(&self) -> bool;
}

/// Result of one parse attempt: the program plus any error messages.
///
/// The program is always present so best-effort callers can still run the
/// well-formed part of a source that had errors.
#[derive(Debug, Clone)]
pub struct Parsed<P> {
    pub program: P,
    pub errors: Vec<String>,
}

impl<P> Parsed<P> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex → parse → evaluate, with an explicit binding scope.
pub trait Pipeline {
    /// Identifier → value mapping, mutated in place by [`Pipeline::eval`].
    type Scope;
    /// Parsed program; consumed by a single evaluation.
    type Program;
    /// Evaluation result.
    type Value: Evaluated;

    /// A fresh, empty scope independent of every other scope.
    fn new_scope(&self) -> Self::Scope;

    /// Parse `source` into a program and its error messages.
    fn parse(&self, source: &str) -> Parsed<Self::Program>;

    /// Evaluate `program` against `scope`.  `None` means "no value".
    fn eval(&self, program: &Self::Program, scope: &mut Self::Scope) -> Option<Self::Value>;
}
