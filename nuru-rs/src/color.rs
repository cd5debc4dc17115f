//! ANSI foreground colors for console output.
//!
//! The console writes raw SGR escapes instead of crossterm commands so the
//! bytes that reach a pipe are exactly `ESC[<code>m … ESC[0m`.

use std::fmt;

/// The SGR reset sequence that terminates every colorized span.
pub const RESET: &str = "\x1b[0m";

/// Standard 8-color foreground palette, valued by SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
}

impl Color {
    /// Color used for successfully evaluated values.
    pub const SUCCESS: Color = Color::Green;
    /// Color used for parse errors and the error glyph.
    pub const ERROR: Color = Color::Red;

    /// The numeric SGR code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a color by SGR code.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            30 => Color::Black,
            31 => Color::Red,
            32 => Color::Green,
            33 => Color::Yellow,
            34 => Color::Blue,
            35 => Color::Magenta,
            36 => Color::Cyan,
            37 => Color::White,
            _ => return None,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}m", self.code())
    }
}

/// Wrap `text` in the escape sequence for `color`, followed by a reset.
pub fn colorize(text: &str, color: Color) -> String {
    format!("{color}{text}{RESET}")
}
