//! Running a [`Tutor`] on the real terminal: raw mode, the alternate screen,
//! optional mouse capture, and a blocking read/handle/draw loop.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::{Flow, Tutor};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Report clicks and the wheel to the tutor.
    pub mouse: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { mouse: true }
    }
}

/// `true` when both stdin and stdout are terminals.
pub fn is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 && libc::isatty(libc::STDOUT_FILENO) != 0 }
}

// ── TerminalGuard ─────────────────────────────────────────────────────────────

/// RAII guard: restores the terminal when dropped, including on panic unwind.
struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W, mouse: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on Drop undoes whatever succeeded.
        let guard = Self { mouse };
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.mouse {
            let _ = execute!(out, DisableMouseCapture);
        }
        let _ = execute!(out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Take over the terminal and run `tutor` until it asks to quit.
///
/// Fails with [`Error::TerminalInit`] if the terminal cannot be set up; the
/// terminal is restored on every exit path.
pub fn run(tutor: &mut Tutor, options: Options) -> Result<()> {
    if !is_terminal() {
        return Err(Error::TerminalInit(io::Error::new(
            io::ErrorKind::Unsupported,
            "stdin and stdout must be a terminal",
        )));
    }

    let mut out = io::stdout();
    let _guard = TerminalGuard::enter(&mut out, options.mouse).map_err(Error::TerminalInit)?;
    let (width, height) = terminal::size().map_err(Error::TerminalInit)?;
    tutor.resize(width, height);
    tracing::info!(width, height, mouse = options.mouse, "tutor started");

    loop {
        tutor.render(&mut out)?;
        let ev = event::read()?;
        if tutor.handle(ev) == Flow::Quit {
            break;
        }
    }
    tracing::info!("tutor closed");
    Ok(())
}
