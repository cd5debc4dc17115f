//! The interactive read → parse → evaluate → print loop.
//!
//! One [`Console`] owns one binding scope for its whole life; every accepted
//! line evaluates against it.  Lines that fail to parse are reported and never
//! evaluated, so they leave the scope untouched.
//!
//! The exit keywords do not terminate the process here.  [`Console::run`]
//! returns [`Outcome::Quit`] and the caller decides what to do with it.

use std::io::{self, BufRead, Write};

use crate::color::{colorize, Color};
use crate::glyphs::{is_exit_keyword, FAREWELL, PROMPT};
use crate::pipeline::{Evaluated, Pipeline};
use crate::report::write_parse_errors;

/// What to do after one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// An exit keyword was entered; the farewell has been written.
    Quit,
}

/// Why [`Console::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EndOfInput,
    Quit,
}

pub struct Console<P: Pipeline> {
    pipeline: P,
    scope: P::Scope,
}

impl<P: Pipeline> Console<P> {
    /// A console with a fresh, empty scope.
    pub fn new(pipeline: P) -> Self {
        let scope = pipeline.new_scope();
        Self { pipeline, scope }
    }

    /// The session scope.
    pub fn scope(&self) -> &P::Scope {
        &self.scope
    }

    /// Handle one input line, writing any result or errors to `out`.
    pub fn eval_line<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> io::Result<Step> {
        if is_exit_keyword(line) {
            writeln!(out, "{FAREWELL}")?;
            return Ok(Step::Quit);
        }

        let parsed = self.pipeline.parse(line);
        if parsed.has_errors() {
            write_parse_errors(out, &parsed.errors)?;
            return Ok(Step::Continue);
        }

        if let Some(value) = self.pipeline.eval(&parsed.program, &mut self.scope) {
            if !value.is_null() {
                writeln!(out, "{}", colorize(&value.inspect(), Color::SUCCESS))?;
            }
        }
        Ok(Step::Continue)
    }

    /// Prompt, read and evaluate lines until end of input or an exit keyword.
    ///
    /// Input that is not valid UTF-8 is decoded lossily and goes through the
    /// parser like any other line.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<Outcome> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(Outcome::EndOfInput);
            }
            let line = String::from_utf8_lossy(&buf);
            let text = line.trim_end_matches(['\n', '\r']);

            if self.eval_line(text, &mut out)? == Step::Quit {
                out.flush()?;
                return Ok(Outcome::Quit);
            }
            out.flush()?;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
