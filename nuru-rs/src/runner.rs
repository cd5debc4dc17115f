//! One-shot evaluation of a whole script.
//!
//! Unlike the console, the runner is best-effort: parse errors are reported
//! (with the error face) and the statements that did parse are still run.

use std::io::{self, Write};
use std::path::Path;

use crate::color::{colorize, Color};
use crate::error::{Error, Result};
use crate::pipeline::{Evaluated, Pipeline};
use crate::report::{write_error_face, write_parse_errors};

/// File extensions accepted as scripts.
pub const SCRIPT_EXTENSIONS: [&str; 2] = ["nr", "sw"];

/// Parse and evaluate `source` in a brand-new scope.
pub fn run_script<P, W>(pipeline: &P, source: &str, out: &mut W) -> io::Result<()>
where
    P: Pipeline,
    W: Write + ?Sized,
{
    let mut scope = pipeline.new_scope();
    let parsed = pipeline.parse(source);

    if parsed.has_errors() {
        write_error_face(out)?;
        write_parse_errors(out, &parsed.errors)?;
    }

    if let Some(value) = pipeline.eval(&parsed.program, &mut scope) {
        if !value.is_null() {
            writeln!(out, "{}", colorize(&value.inspect(), Color::SUCCESS))?;
        }
    }
    out.flush()
}

/// Read a script from disk, rejecting files without a script extension.
pub fn load_script(path: &Path) -> Result<String> {
    let ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCRIPT_EXTENSIONS.contains(&e));
    if !ok {
        return Err(Error::UnsupportedScript(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), "loading script");
    Ok(std::fs::read_to_string(path)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::glyphs::ERROR_HEADER;
    use crate::lang::Nuru;

    fn run(src: &str) -> String {
        let mut out = Vec::new();
        run_script(&Nuru, src, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_last_value() {
        assert_eq!(run("fanya a = 2\nfanya b = 3\na * b\n"), "\x1b[32m6\x1b[0m\n");
    }

    #[test]
    fn null_result_prints_nothing() {
        assert_eq!(run("fanya a = 2"), "");
        assert_eq!(run(""), "");
    }

    #[test]
    fn parse_errors_are_reported_then_evaluation_proceeds() {
        let out = run("x =\n5 + 5\n");
        assert!(out.starts_with("\x1b[31m"), "error face first: {out:?}");
        assert!(out.contains(&format!("{ERROR_HEADER}\n\t\x1b[31mLine 1: ")));
        assert!(out.ends_with("\x1b[32m10\x1b[0m\n"), "{out:?}");
    }

    #[test]
    fn runner_and_console_diverge_on_malformed_input() {
        let src = "5 + 5; 1 +";

        let script = run(src);
        assert!(script.contains("\x1b[32m10\x1b[0m"));

        let mut console = Console::new(Nuru);
        let mut out = Vec::new();
        console.eval_line(src, &mut out).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(!line.contains("\x1b[32m"));
    }

    #[test]
    fn every_run_gets_a_fresh_scope() {
        assert_eq!(run("fanya x = 1"), "");
        assert_eq!(run("x"), "\x1b[32mKosa: unknown identifier: x\x1b[0m\n");
    }

    #[test]
    fn load_script_checks_extension() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("hello.nr");
        std::fs::write(&good, "1 + 1").unwrap();
        assert_eq!(load_script(&good).unwrap(), "1 + 1");

        let sw = dir.path().join("habari.sw");
        std::fs::write(&sw, "2").unwrap();
        assert!(load_script(&sw).is_ok());

        let bad = dir.path().join("hello.txt");
        std::fs::write(&bad, "1").unwrap();
        assert!(matches!(load_script(&bad), Err(Error::UnsupportedScript(_))));
    }

    #[test]
    fn load_script_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.nr");
        assert!(matches!(load_script(&missing), Err(Error::Io(_))));
    }
}
