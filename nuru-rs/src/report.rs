//! Terminal reporting of parse-error batches.

use std::io::{self, Write};

use crate::color::{colorize, Color};
use crate::glyphs::{ERROR_FACE, ERROR_HEADER, INDENT};

/// Write the error header followed by one indented, red line per message.
///
/// Always emits `errors.len() + 1` lines, in input order.
pub fn write_parse_errors<W: Write + ?Sized>(out: &mut W, errors: &[String]) -> io::Result<()> {
    writeln!(out, "{ERROR_HEADER}")?;
    for msg in errors {
        writeln!(out, "{INDENT}{}", colorize(msg, Color::ERROR))?;
    }
    Ok(())
}

/// Write the block-art error face in red, followed by a newline.
pub fn write_error_face<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", colorize(ERROR_FACE, Color::ERROR))
}
