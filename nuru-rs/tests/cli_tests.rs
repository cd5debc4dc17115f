//! End-to-end tests: run the `nuru` binary with piped stdin and check what it
//! prints.  Output is normalised before comparison (see `normalise_output`).
//!
//! Every run passes a bare `-f` (after any script path, so it is not taken as
//! the rc file name) so a developer's own `~/.nururc` never leaks in.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Path to the `nuru` binary built by this Cargo workspace.
fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nuru"))
}

/// Run the binary with `args`, feeding `stdin`.
fn run(args: &[&str], stdin: impl AsRef<[u8]>) -> Output {
    let mut child = Command::new(binary())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("NURURC")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn nuru binary");
    {
        let mut pipe = child.stdin.take().expect("stdin not open");
        pipe.write_all(stdin.as_ref()).expect("write to stdin");
    }
    child.wait_with_output().expect("wait failed")
}

/// Run a console session (`-f`, no script).
fn repl(input: &str) -> Output {
    run(&["-f"], input)
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek().copied() {
                Some('[') => {
                    chars.next();
                    for c2 in chars.by_ref() {
                        if c2.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Normalise output for comparison:
/// 1. Strip ANSI codes.
/// 2. Remove prompts (they share a line with whatever follows them).
/// 3. Trim trailing whitespace, keeping a leading TAB.
/// 4. Drop empty lines.
fn normalise_output(raw: &[u8]) -> Vec<String> {
    strip_ansi(&String::from_utf8_lossy(raw))
        .replace(">>> ", "")
        .lines()
        .map(|l| l.trim_end().to_owned())
        .filter(|l| !l.trim().is_empty())
        .collect()
}

/// Console output after the banner (everything after the hint line).
fn session_lines(out: &Output) -> Vec<String> {
    let lines = normalise_output(&out.stdout);
    match lines.iter().position(|l| l.starts_with("Andika")) {
        Some(i) => lines[i + 1..].to_vec(),
        None => lines,
    }
}

fn stderr(out: &Output) -> String {
    strip_ansi(&String::from_utf8_lossy(&out.stderr))
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write script");
    path
}

const FAREWELL: &str = "✨🅺🅰🆁🅸🅱🆄 🆃🅴🅽🅰✨";

// ── Console ───────────────────────────────────────────────────────────────────

#[test]
fn banner_then_prompt() {
    let out = repl("");
    assert!(out.status.success());
    let text = strip_ansi(&String::from_utf8_lossy(&out.stdout));
    assert!(text.contains(&format!("nuru v{}", env!("CARGO_PKG_VERSION"))));
    assert!(text.contains("exit()"));
    assert!(text.ends_with(">>> "));
}

#[test]
fn bindings_persist_across_lines() {
    let out = repl("fanya x = 2\nx * 21\nexit()\n");
    assert!(out.status.success());
    assert_eq!(session_lines(&out), ["42", FAREWELL]);
}

#[test]
fn toka_also_quits() {
    let out = repl("toka()\n1 + 1\n");
    assert!(out.status.success());
    assert_eq!(session_lines(&out), [FAREWELL]);
}

#[test]
fn end_of_input_exits_quietly() {
    let out = repl("\"habari\"\n");
    assert!(out.status.success());
    assert_eq!(session_lines(&out), ["habari"]);
}

#[test]
fn parse_errors_are_listed_and_session_continues() {
    let out = repl("x =\n5 + 5\n");
    assert!(out.status.success());
    assert_eq!(
        session_lines(&out),
        [
            "Kuna Errors Zifuatazo:",
            "\tLine 1: expected expression, found end of input",
            "10",
        ]
    );
}

#[test]
fn failed_line_does_not_bind() {
    let out = repl("fanya y = 1\nfanya y = 2 3\ny\n");
    let lines = session_lines(&out);
    assert_eq!(lines.last().map(String::as_str), Some("1"));
    assert!(lines.iter().any(|l| l == "Kuna Errors Zifuatazo:"));
}

#[test]
fn invalid_utf8_line_does_not_end_session() {
    let out = run(&["-f"], b"fanya x = 1\n\xff\nx\n");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let lines = session_lines(&out);
    assert_eq!(lines.first().map(String::as_str), Some("Kuna Errors Zifuatazo:"));
    assert_eq!(lines.last().map(String::as_str), Some("1"));
}

#[test]
fn very_deep_expression_is_a_parse_error() {
    let input = format!("fanya x = 3\n{}1\n{}1\nx\n", "-".repeat(10_000), "1+".repeat(50_000));
    let out = repl(&input);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let lines = session_lines(&out);
    let nested = lines.iter().filter(|l| l.as_str() == "\tLine 1: expression too deeply nested").count();
    assert_eq!(nested, 2, "{lines:?}");
    assert_eq!(lines.last().map(String::as_str), Some("3"));
}

#[test]
fn runtime_errors_are_values() {
    let out = repl("10 / 0\nhaipo\n");
    assert_eq!(
        session_lines(&out),
        ["Kosa: division by zero", "Kosa: unknown identifier: haipo"]
    );
}

#[test]
fn results_are_green() {
    let out = repl("kweli\n");
    let raw = String::from_utf8_lossy(&out.stdout);
    assert!(raw.contains("\x1b[32mkweli\x1b[0m"), "{raw:?}");
}

#[test]
fn null_prints_nothing() {
    let out = repl("tupu\nfanya z = 3\n");
    assert!(session_lines(&out).is_empty());
}

// ── Script runner ─────────────────────────────────────────────────────────────

#[test]
fn script_prints_last_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "sum.nr", "fanya a = 5\nfanya b = 10\na + b\n");
    let out = run(&[path.to_str().unwrap(), "-f"], "");
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(normalise_output(&out.stdout), ["15"]);
}

#[test]
fn swahili_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "hello.sw", "\"habari \" * 2");
    let out = run(&[path.to_str().unwrap(), "-f"], "");
    assert!(out.status.success());
    assert_eq!(normalise_output(&out.stdout), ["habari habari"]);
}

#[test]
fn script_with_errors_shows_face_and_still_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "bad.nr", "fanya = 3\n10 / 4\n");
    let out = run(&[path.to_str().unwrap(), "-f"], "");
    assert!(out.status.success());
    let lines = normalise_output(&out.stdout);
    assert!(lines.iter().any(|l| l.contains("█▄▀ █░█ █▄░█")), "{lines:?}");
    let header = lines
        .iter()
        .position(|l| l == "Kuna Errors Zifuatazo:")
        .expect("error header");
    assert!(lines[header + 1].starts_with("\tLine 1: "));
    assert_eq!(lines.last().map(String::as_str), Some("2.5"));
}

#[test]
fn wrong_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "notes.txt", "1 + 1");
    let out = run(&[path.to_str().unwrap(), "-f"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("is not a Nuru script"));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_script_fails() {
    let out = run(&["/definitely/not/here.nr", "-f"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("I/O error"));
}

// ── Flags ─────────────────────────────────────────────────────────────────────

#[test]
fn version_flag() {
    let out = run(&["--version"], "");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        format!("nuru {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn help_flag() {
    let out = run(&["-h"], "");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Usage: nuru"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let out = run(&["-z"], "");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("unknown option: -z"));
    assert!(err.contains("Usage: nuru"));
}

#[test]
fn two_scripts_is_usage_error() {
    let out = run(&["a.nr", "b.nr"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("too many arguments"));
}

#[test]
fn docs_without_terminal_is_fatal() {
    let out = run(&["-f", "--docs"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot initialise terminal"));
}

// ── Config ────────────────────────────────────────────────────────────────────

#[test]
fn bad_config_lines_warn_but_run() {
    let dir = tempfile::tempdir().unwrap();
    let rc = write_script(dir.path(), "rc", "/set width=wide\n/set mouse=off\n");
    let flag = format!("-f{}", rc.display());
    let out = run(&[flag.as_str()], "1 + 2\n");
    assert!(out.status.success());
    assert!(stderr(&out).contains("line 1: /set width: expected a positive number"));
    assert_eq!(session_lines(&out), ["3"]);
}

#[test]
fn rc_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let rc = write_script(dir.path(), "rc", "/set colour=red\n");
    let out = Command::new(binary())
        .env("NURURC", &rc)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run nuru");
    assert!(out.status.success());
    assert!(stderr(&out).contains("unknown setting 'colour'"));
}

#[test]
fn logfile_receives_logs() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("nuru.log");
    let rc = write_script(
        dir.path(),
        "rc",
        &format!("/set logfile \"{}\"\n/set log=debug\n", log.display()),
    );
    let flag = format!("-f{}", rc.display());
    let out = run(&[flag.as_str()], "x =\n");
    assert!(out.status.success());
    let text = std::fs::read_to_string(&log).expect("log file written");
    assert!(text.contains("DEBUG"), "{text}");
    assert!(!text.contains('\x1b'));
}
