//! `.nururc` configuration file parser.
//!
//! The file uses a small line-oriented dialect:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <name>=<value>` or `/set <name> <value>` | change a setting |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Recognised settings:
//!
//! | Name | Values | Default |
//! |------|--------|---------|
//! | `mouse` | `on`, `off`, `1`, `0` | `on` |
//! | `log` | a `tracing` filter directive such as `debug` or `nuru=trace` | unset |
//! | `logfile` | path to append logs to | unset |
//! | `width` | maximum wrap width for documents, in columns | terminal width |

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};

/// Environment variable naming an rc file to use instead of the defaults.
pub const RC_ENV: &str = "NURURC";

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Capture the mouse in the tutor.
    pub mouse: bool,
    /// Log filter used when `RUST_LOG` is not set.
    pub log: Option<String>,
    /// Write logs here instead of stderr.
    pub logfile: Option<PathBuf>,
    /// Cap on the document wrap width.
    pub width: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse: true,
            log: None,
            logfile: None,
            width: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config string.
    ///
    /// Unknown directives are skipped.  Bad `/set` lines leave the setting at
    /// its previous value and are returned as errors.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut settings = Settings::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));

            if cmd == "set" {
                let tokens = split_args(args_str.trim());
                let result = parse_set(&tokens).and_then(|(name, value)| settings.apply(&name, &value));
                if let Err(message) = result {
                    errors.push(ConfigError { line: lineno, message });
                }
            }
        }

        (settings, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Set one value by name.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "mouse" => {
                self.mouse = parse_switch(value)
                    .ok_or_else(|| format!("/set mouse: expected on or off, got '{value}'"))?;
            }
            "log" => self.log = non_empty(value),
            "logfile" => self.logfile = non_empty(value).map(PathBuf::from),
            "width" => match value.parse::<u16>() {
                Ok(0) | Err(_) => {
                    return Err(format!("/set width: expected a positive number, got '{value}'"))
                }
                Ok(n) => self.width = Some(n),
            },
            _ => return Err(format!("/set: unknown setting '{name}'")),
        }
        Ok(())
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "1" => Some(true),
        "off" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() {
                    args.push(std::mem::take(&mut cur));
                }
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        args.push(cur);
    }
    args
}

// ── /set ─────────────────────────────────────────────────────────────────────

/// Parse `/set <name>=<value>` or `/set <name> <value>`.  In both forms the
/// value runs to the end of the line, words rejoined with single spaces.
fn parse_set(tokens: &[String]) -> Result<(String, String), String> {
    let Some(first) = tokens.first() else {
        return Err("/set: requires an argument".into());
    };

    let (name, value) = if let Some((name, head)) = first.split_once('=') {
        let words: Vec<&str> = std::iter::once(head)
            .chain(tokens[1..].iter().map(String::as_str))
            .filter(|w| !w.is_empty())
            .collect();
        (name.to_owned(), words.join(" "))
    } else if tokens.len() >= 2 {
        (first.clone(), tokens[1..].join(" "))
    } else {
        return Err(format!("/set: missing value for '{first}'"));
    };

    if name.is_empty() {
        return Err("/set: variable name cannot be empty".into());
    }
    Ok((name, value))
}

// ── Lookup ────────────────────────────────────────────────────────────────────

/// Where to look for the rc file, most specific first: `$NURURC`,
/// `~/.nururc`, then `nururc` in the platform config directory.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(p) = std::env::var_os(RC_ENV).filter(|p| !p.is_empty()) {
        paths.push(PathBuf::from(p));
    }
    if let Some(base) = BaseDirs::new() {
        paths.push(base.home_dir().join(".nururc"));
    }
    if let Some(proj) = ProjectDirs::from("", "", "nuru") {
        paths.push(proj.config_dir().join("nururc"));
    }
    paths
}

/// The first candidate rc file that exists.
pub fn find_user_config() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|p| p.is_file())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // -- split_args -----------------------------------------------------------

    #[test]
    fn split_simple() {
        assert_eq!(split_args("logfile /tmp/nuru.log"), ["logfile", "/tmp/nuru.log"]);
    }

    #[test]
    fn split_quoted_spaces() {
        assert_eq!(split_args(r#"logfile "/tmp/my logs/nuru.log""#), ["logfile", "/tmp/my logs/nuru.log"]);
    }

    #[test]
    fn split_escaped_quote_inside_quotes() {
        assert_eq!(split_args(r#""say \"hi\"""#), [r#"say "hi""#]);
    }

    // -- /set -----------------------------------------------------------------

    #[test]
    fn defaults() {
        let (s, errs) = Settings::load_str("");
        assert!(errs.is_empty());
        assert_eq!(s, Settings::default());
        assert!(s.mouse);
    }

    #[test]
    fn set_equals_syntax() {
        let (s, errs) = Settings::load_str("/set mouse=off");
        assert!(errs.is_empty(), "{errs:?}");
        assert!(!s.mouse);
    }

    #[test]
    fn set_space_syntax() {
        let (s, errs) = Settings::load_str("/set width 72");
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(s.width, Some(72));
    }

    #[test]
    fn set_value_with_spaces() {
        let (s, errs) = Settings::load_str("/set log nuru=debug, warn");
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(s.log.as_deref(), Some("nuru=debug, warn"));
    }

    #[test]
    fn logfile_path() {
        let (s, errs) = Settings::load_str(r#"/set logfile "/tmp/a b.log""#);
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(s.logfile, Some(PathBuf::from("/tmp/a b.log")));
    }

    #[test]
    fn equals_value_keeps_every_word() {
        let (s, errs) = Settings::load_str("/set logfile=/tmp/my logs/x.log");
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(s.logfile, Some(PathBuf::from("/tmp/my logs/x.log")));

        let (s, errs) = Settings::load_str("/set log= nuru=debug,  warn");
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(s.log.as_deref(), Some("nuru=debug, warn"));
    }

    #[test]
    fn mouse_switch_values() {
        for (v, want) in [("on", true), ("OFF", false), ("1", true), ("0", false)] {
            let (s, errs) = Settings::load_str(&format!("/set mouse={v}"));
            assert!(errs.is_empty(), "{v}: {errs:?}");
            assert_eq!(s.mouse, want, "{v}");
        }
    }

    #[test]
    fn bad_values_are_reported_with_line() {
        let (s, errs) = Settings::load_str("/set width=72\n/set mouse=maybe\n/set width=0\n/set colour=red");
        assert_eq!(errs.len(), 3, "{errs:?}");
        assert_eq!(errs[0].line, 2);
        assert_eq!(errs[1].line, 3);
        assert_eq!(errs[2].to_string(), "line 4: /set: unknown setting 'colour'");
        assert!(s.mouse);
        assert_eq!(s.width, Some(72));
    }

    #[test]
    fn set_without_value_is_error() {
        let (_, errs) = Settings::load_str("/set width");
        assert_eq!(errs[0].message, "/set: missing value for 'width'");
        let (_, errs) = Settings::load_str("/set");
        assert_eq!(errs[0].message, "/set: requires an argument");
        let (_, errs) = Settings::load_str("/set =3");
        assert_eq!(errs[0].message, "/set: variable name cannot be empty");
    }

    #[test]
    fn later_lines_win() {
        let (s, _) = Settings::load_str("/set width=60\n/set width=90");
        assert_eq!(s.width, Some(90));
    }

    // -- Comments & skipping --------------------------------------------------

    #[test]
    fn semicolon_comments_ignored() {
        let (s, errs) = Settings::load_str(
            ";; This is a comment\n\
             ; /set mouse=off\n\
             /set width=80",
        );
        assert!(errs.is_empty(), "{errs:?}");
        assert!(s.mouse);
        assert_eq!(s.width, Some(80));
    }

    #[test]
    fn unknown_commands_and_text_skipped() {
        let (s, errs) = Settings::load_str("/theme dark\nplain text\n/set log=info");
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(s.log.as_deref(), Some("info"));
    }

    #[test]
    fn load_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nururc");
        std::fs::write(&path, "/set mouse=off\n/set width=50\n").unwrap();
        let (s, errs) = Settings::load_file(&path).unwrap();
        assert!(errs.is_empty());
        assert!(!s.mouse);
        assert_eq!(s.width, Some(50));
    }

    #[test]
    fn load_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load_file(&dir.path().join("absent")).is_err());
    }
}
