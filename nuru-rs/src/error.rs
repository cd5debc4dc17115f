//! Crate-wide error type.
//!
//! Parse errors are not represented here: they are ordinary data returned
//! alongside the program (see [`crate::pipeline::Parsed`]) and are reported
//! to the user rather than propagated.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Locale;

/// Errors surfaced by the console, the script runner and the tutor.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The tutor could not take over the terminal.  Always fatal.
    #[error("cannot initialise terminal: {0}")]
    TerminalInit(#[source] io::Error),

    #[error("no document '{filename}' for locale '{}'", locale.code())]
    DocNotFound { locale: Locale, filename: String },

    #[error("{0}")]
    Usage(String),

    #[error("{} is not a Nuru script (expected a .nr or .sw file)", .0.display())]
    UnsupportedScript(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
