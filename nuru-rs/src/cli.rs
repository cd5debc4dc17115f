//! Command-line argument parsing.
//!
//! Usage:
//!   nuru [-f[<file>]] [<script>]
//!   nuru [-f[<file>]] -d | --docs
//!   nuru -v | --version
//!   nuru -h | --help

use std::path::PathBuf;

use crate::error::{Error, Result};

pub const USAGE: &str = "\
Usage: nuru [-f[<file>]] [<script>]
       nuru [-f[<file>]] -d | --docs
       nuru -v | --version
       nuru -h | --help

  <script>      run a .nr or .sw file
  -d, --docs    browse the documentation
  -f<file>      read settings from <file>; -f alone skips the rc file
  -v, --version print the version
  -h, --help    print this message";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Config-file specification.
    pub config: ConfigFile,
    /// What to do.
    pub mode: Mode,
}

/// How to choose the user config file.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum ConfigFile {
    /// `$NURURC`, `~/.nururc`, then the platform config dir (default).
    #[default]
    Search,
    /// `-f` with no file argument: skip user config.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Interactive console (no arguments).
    #[default]
    Repl,
    /// Run a script file.
    Script(PathBuf),
    /// Documentation browser.
    Docs,
    Version,
    Help,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()`.
pub fn parse_args() -> Result<CliArgs> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    parse_argv(&raw)
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let (mut docs, mut version, mut help) = (false, false, false);
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            positional.extend(argv[i + 1..].iter().cloned());
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            match long {
                "docs" => docs = true,
                "version" => version = true,
                "help" => help = true,
                _ => return Err(Error::Usage(format!("unknown option: {arg}"))),
            }
            i += 1;
            continue;
        }

        // Non-flag argument.
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        // Flag argument: iterate over characters after the leading `-`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => docs = true,
                'v' => version = true,
                'h' => help = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        // Embedded: -f<file>
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else if i + 1 < argv.len() && !argv[i + 1].starts_with('-') {
                        // Separate: -f <file>
                        i += 1;
                        args.config = ConfigFile::Explicit(PathBuf::from(&argv[i]));
                    } else {
                        // -f alone → skip user config
                        args.config = ConfigFile::Skip;
                    }
                }

                c => return Err(Error::Usage(format!("unknown option: -{c}"))),
            }
            j += 1;
        }
        i += 1;
    }

    if positional.len() > 1 {
        return Err(Error::Usage(format!("too many arguments ({})", positional.len())));
    }
    let script = positional.pop().map(PathBuf::from);

    args.mode = match (help, version, docs, script) {
        (true, ..) => Mode::Help,
        (_, true, ..) => Mode::Version,
        (_, _, true, Some(path)) => {
            return Err(Error::Usage(format!(
                "--docs does not take a script ({})",
                path.display()
            )))
        }
        (_, _, true, None) => Mode::Docs,
        (_, _, false, Some(path)) => Mode::Script(path),
        (_, _, false, None) => Mode::Repl,
    };

    Ok(args)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|&s| s.to_owned()).collect()
    }

    fn mode(args: &[&str]) -> Mode {
        parse_argv(&argv(args)).unwrap().mode
    }

    #[test]
    fn empty_args() {
        let a = parse_argv(&argv(&[])).unwrap();
        assert_eq!(a.mode, Mode::Repl);
        assert_eq!(a.config, ConfigFile::Search);
    }

    #[test]
    fn script_positional() {
        assert_eq!(mode(&["hello.nr"]), Mode::Script(PathBuf::from("hello.nr")));
    }

    #[test]
    fn docs_flags() {
        assert_eq!(mode(&["-d"]), Mode::Docs);
        assert_eq!(mode(&["--docs"]), Mode::Docs);
    }

    #[test]
    fn version_and_help() {
        assert_eq!(mode(&["-v"]), Mode::Version);
        assert_eq!(mode(&["--version"]), Mode::Version);
        assert_eq!(mode(&["-h"]), Mode::Help);
        assert_eq!(mode(&["--help"]), Mode::Help);
    }

    #[test]
    fn help_wins_over_everything() {
        assert_eq!(mode(&["-dvh"]), Mode::Help);
        assert_eq!(mode(&["-v", "script.nr"]), Mode::Version);
    }

    #[test]
    fn docs_with_script_is_usage_error() {
        let err = parse_argv(&argv(&["-d", "x.nr"])).unwrap_err();
        assert!(matches!(err, Error::Usage(m) if m.contains("x.nr")));
    }

    #[test]
    fn config_skip() {
        let a = parse_argv(&argv(&["-f"])).unwrap();
        assert_eq!(a.config, ConfigFile::Skip);
    }

    #[test]
    fn config_skip_then_flag() {
        let a = parse_argv(&argv(&["-f", "-d"])).unwrap();
        assert_eq!(a.config, ConfigFile::Skip);
        assert_eq!(a.mode, Mode::Docs);
    }

    #[test]
    fn config_explicit_embedded() {
        let a = parse_argv(&argv(&["-fmy.rc", "run.sw"])).unwrap();
        assert_eq!(a.config, ConfigFile::Explicit(PathBuf::from("my.rc")));
        assert_eq!(a.mode, Mode::Script(PathBuf::from("run.sw")));
    }

    #[test]
    fn config_explicit_separate() {
        let a = parse_argv(&argv(&["-f", "my.rc"])).unwrap();
        assert_eq!(a.config, ConfigFile::Explicit(PathBuf::from("my.rc")));
        assert_eq!(a.mode, Mode::Repl);
    }

    #[test]
    fn double_dash_ends_flags() {
        assert_eq!(mode(&["--", "-odd.nr"]), Mode::Script(PathBuf::from("-odd.nr")));
    }

    #[test]
    fn too_many_positional() {
        assert!(matches!(parse_argv(&argv(&["a.nr", "b.nr"])), Err(Error::Usage(_))));
    }

    #[test]
    fn unknown_flags() {
        assert!(matches!(parse_argv(&argv(&["-z"])), Err(Error::Usage(_))));
        assert!(matches!(parse_argv(&argv(&["--zap"])), Err(Error::Usage(_))));
    }
}
