//! Log output setup.
//!
//! Logs go to the `logfile` setting if there is one (without colour),
//! otherwise to stderr but only when `RUST_LOG` is set, so the console stays
//! clean by default.  The filter comes from `RUST_LOG`, then the `log`
//! setting, then [`DEFAULT_FILTER`].

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;

pub const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    File(PathBuf),
    Stderr,
    Off,
}

/// Where logs should go.
pub fn sink(rust_log: Option<&str>, settings: &Settings) -> Sink {
    match (&settings.logfile, rust_log) {
        (Some(path), _) => Sink::File(path.clone()),
        (None, Some(_)) => Sink::Stderr,
        (None, None) => Sink::Off,
    }
}

/// The filter directive to use.
pub fn filter_directive(rust_log: Option<&str>, settings: &Settings) -> String {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .or(settings.log.as_deref())
        .unwrap_or(DEFAULT_FILTER)
        .to_owned()
}

/// Install the global subscriber.  Only the first call does anything.
///
/// Fails only if the log file cannot be opened.
pub fn init(settings: &Settings) -> io::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let sink = sink(rust_log.as_deref(), settings);
    let directive = filter_directive(rust_log.as_deref(), settings);

    let mut result = Ok(());
    INIT.call_once(|| result = install(sink, &directive));
    result
}

fn install(sink: Sink, directive: &str) -> io::Result<()> {
    let filter = EnvFilter::new(directive);
    match sink {
        Sink::Off => {}
        Sink::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .with(filter)
                .try_init();
        }
        Sink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(filter)
                .try_init();
        }
    }
    Ok(())
}
