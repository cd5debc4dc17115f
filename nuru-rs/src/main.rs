use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nuru::catalog::Catalog;
use nuru::cli::{self, CliArgs, ConfigFile, Mode};
use nuru::color::{colorize, Color};
use nuru::config::{self, ConfigError, Settings};
use nuru::console::Console;
use nuru::docs::DocStore;
use nuru::glyphs::{CONSOLE_HINT, LOGO};
use nuru::lang::Nuru;
use nuru::tutor::{self, PlainRenderer, Tutor};
use nuru::{logging, runner};

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("nuru: {e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::FAILURE;
        }
    };

    match args.mode {
        Mode::Help => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Mode::Version => {
            println!("nuru {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    // ── Settings and logging ──────────────────────────────────────────────────
    let (settings, config_path, config_errors) = load_settings(&args);
    if let Err(e) = logging::init(&settings) {
        eprintln!("nuru: warning: cannot open log file: {e}");
    }
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "settings loaded");
        for e in &config_errors {
            tracing::warn!(path = %path.display(), "{e}");
            eprintln!("nuru: warning: {}: {e}", path.display());
        }
    }

    // ── Run ───────────────────────────────────────────────────────────────────
    let result = match args.mode {
        Mode::Script(path) => script(&path),
        Mode::Docs => docs(&settings),
        _ => repl(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("nuru: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Read the rc file the arguments ask for.  A missing default file is not an
/// error; a missing `-f` file is reported and defaults are used.
fn load_settings(args: &CliArgs) -> (Settings, Option<PathBuf>, Vec<ConfigError>) {
    let path = match &args.config {
        ConfigFile::Skip => return (Settings::default(), None, Vec::new()),
        ConfigFile::Explicit(path) => Some(path.clone()),
        ConfigFile::Search => config::find_user_config(),
    };
    let Some(path) = path else {
        return (Settings::default(), None, Vec::new());
    };
    match Settings::load_file(&path) {
        Ok((settings, errors)) => (settings, Some(path), errors),
        Err(e) => {
            eprintln!("nuru: warning: {}: {e}", path.display());
            (Settings::default(), None, Vec::new())
        }
    }
}

fn repl() -> nuru::Result<()> {
    println!("{}", colorize(LOGO, Color::Yellow));
    println!("nuru v{}", env!("CARGO_PKG_VERSION"));
    println!("{CONSOLE_HINT}\n");

    let mut console = Console::new(Nuru);
    let outcome = console.run(io::stdin().lock(), io::stdout().lock())?;
    tracing::debug!(?outcome, "console finished");
    Ok(())
}

fn script(path: &Path) -> nuru::Result<()> {
    let source = runner::load_script(path)?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "running script");
    runner::run_script(&Nuru, &source, &mut io::stdout().lock())?;
    Ok(())
}

fn docs(settings: &Settings) -> nuru::Result<()> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut tutor = Tutor::new(
        Catalog::builtin(),
        DocStore::embedded(),
        PlainRenderer,
        width,
        height,
    )
    .with_doc_width(settings.width);
    tutor::terminal::run(&mut tutor, tutor::terminal::Options { mouse: settings.mouse })
}
