//! Turning a markdown page into styled, wrapped lines.
//!
//! [`PlainRenderer`] handles the subset the bundled pages use: ATX headings,
//! fenced code, bullet and numbered lists, block quotes, tables, rules and
//! paragraphs.  Styling is left to the drawing code; lines only carry a
//! [`LineKind`].

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading level 1–6.
    Heading(u8),
    Text,
    Code,
    Quote,
    Table,
    Rule,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    pub kind: LineKind,
    pub text: String,
}

impl DocLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

/// Renders a document body for display `width` columns wide.
pub trait DocRenderer {
    fn render(&self, source: &str, width: usize) -> Vec<DocLine>;
}

// ── PlainRenderer ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

const CODE_INDENT: &str = "    ";
const BULLET: &str = "• ";
const QUOTE_BAR: &str = "│ ";

impl DocRenderer for PlainRenderer {
    fn render(&self, source: &str, width: usize) -> Vec<DocLine> {
        let width = width.max(8);
        let mut out = Vec::new();
        let mut paragraph = String::new();
        let mut in_code = false;

        for raw in source.lines() {
            let line = raw.trim_end();

            if line.trim_start().starts_with("```") {
                flush_paragraph(&mut paragraph, width, &mut out);
                in_code = !in_code;
                continue;
            }
            if in_code {
                out.push(DocLine::new(
                    LineKind::Code,
                    format!("{CODE_INDENT}{}", line.replace('\t', "    ")),
                ));
                continue;
            }

            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, width, &mut out);
                if out.last().is_some_and(|l| l.kind != LineKind::Blank) {
                    out.push(DocLine::blank());
                }
            } else if let Some((level, text)) = heading(trimmed) {
                flush_paragraph(&mut paragraph, width, &mut out);
                for piece in wrap(&strip_inline(text), width, "", "") {
                    out.push(DocLine::new(LineKind::Heading(level), piece));
                }
            } else if is_rule(trimmed) {
                flush_paragraph(&mut paragraph, width, &mut out);
                out.push(DocLine::new(LineKind::Rule, "─".repeat(width)));
            } else if trimmed.starts_with('|') {
                flush_paragraph(&mut paragraph, width, &mut out);
                out.push(DocLine::new(LineKind::Table, trimmed));
            } else if let Some(text) = trimmed.strip_prefix('>') {
                flush_paragraph(&mut paragraph, width, &mut out);
                let text = strip_inline(text.trim_start());
                for piece in wrap(&text, width, QUOTE_BAR, QUOTE_BAR) {
                    out.push(DocLine::new(LineKind::Quote, piece));
                }
            } else if let Some((marker, text)) = list_item(trimmed) {
                flush_paragraph(&mut paragraph, width, &mut out);
                let depth = (line.len() - trimmed.len()) / 2;
                let lead = "  ".repeat(depth);
                let first = format!("{lead}{marker}");
                let rest = " ".repeat(first.chars().count());
                for piece in wrap(&strip_inline(text), width, &first, &rest) {
                    out.push(DocLine::new(LineKind::Text, piece));
                }
            } else {
                if !paragraph.is_empty() {
                    paragraph.push(' ');
                }
                paragraph.push_str(trimmed);
            }
        }
        flush_paragraph(&mut paragraph, width, &mut out);
        while out.last().is_some_and(|l| l.kind == LineKind::Blank) {
            out.pop();
        }
        out
    }
}

fn flush_paragraph(paragraph: &mut String, width: usize, out: &mut Vec<DocLine>) {
    if paragraph.is_empty() {
        return;
    }
    for piece in wrap(&strip_inline(paragraph), width, "", "") {
        out.push(DocLine::new(LineKind::Text, piece));
    }
    paragraph.clear();
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3 && ['-', '*', '_'].iter().any(|&m| compact.chars().all(|c| c == m))
}

/// `(marker, text)` for `- x`, `* x`, `+ x` and `12. x`.
fn list_item(line: &str) -> Option<(String, &str)> {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return Some((BULLET.to_owned(), rest));
        }
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Some((format!("{}. ", &line[..digits]), rest));
        }
    }
    None
}

/// Flatten inline markup: `**` / `__` go, code spans lose their backticks
/// and links read `label (url)`.  Images keep only their alt text.
fn strip_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                out.push_str(&after[..end]);
                rest = &after[end + 1..];
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix("**").or_else(|| rest.strip_prefix("__")) {
            rest = after;
            continue;
        }
        if let Some((label, url, after)) = link(rest) {
            out.push_str(&strip_inline(label));
            if let Some(url) = url.filter(|u| !u.is_empty()) {
                out.push_str(" (");
                out.push_str(url);
                out.push(')');
            }
            rest = after;
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// `[label](url)` or `![alt](url)` at the start of `s`: the label, the url
/// (`None` for images) and the text after the closing paren.
fn link(s: &str) -> Option<(&str, Option<&str>, &str)> {
    let (image, s) = match s.strip_prefix('!') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let body = s.strip_prefix('[')?;
    let close = body.find("](")?;
    let label = &body[..close];
    if label.contains(']') {
        return None;
    }
    let target = &body[close + 2..];
    let end = target.find(')')?;
    let url = (!image).then(|| target[..end].trim());
    Some((label, url, &target[end + 1..]))
}

/// Greedy word wrap.  `first` prefixes the first line and `rest` the others;
/// words longer than a line are split.
pub fn wrap(text: &str, width: usize, first: &str, rest: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = first.to_owned();
    let mut current_len = first.chars().count();
    let mut prefix_len = current_len;
    let mut empty = true;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let gap = usize::from(!empty);
            if current_len + gap + word.len() <= width {
                if !empty {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += gap + word.len();
                empty = false;
                break;
            }
            if empty {
                // Nothing on this line yet and the word still does not fit.
                let room = width.saturating_sub(prefix_len).max(1);
                let head: String = word.drain(..room.min(word.len())).collect();
                current.push_str(&head);
                if word.is_empty() {
                    current_len += room;
                    empty = false;
                    break;
                }
            }
            lines.push(std::mem::replace(&mut current, rest.to_owned()));
            current_len = rest.chars().count();
            prefix_len = current_len;
            empty = true;
        }
    }
    if !empty || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[DocLine]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn wrap_basic() {
        assert_eq!(
            wrap("one two three four", 9, "", ""),
            ["one two", "three", "four"]
        );
    }

    #[test]
    fn wrap_with_hanging_indent() {
        assert_eq!(
            wrap("alpha beta gamma", 10, "• ", "  "),
            ["• alpha", "  beta", "  gamma"]
        );
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4, "", ""), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_empty_text() {
        assert_eq!(wrap("", 10, "> ", "> "), ["> "]);
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        assert_eq!(wrap("ñañaña ñañaña", 6, "", ""), ["ñañaña", "ñañaña"]);
    }

    #[test]
    fn headings_code_and_text() {
        let src = "# Title\n\nSome text\nmore text.\n\n```\nfanya x = 1\n```\n";
        let lines = PlainRenderer.render(src, 40);
        assert_eq!(
            kinds(&lines),
            [
                LineKind::Heading(1),
                LineKind::Blank,
                LineKind::Text,
                LineKind::Blank,
                LineKind::Code,
            ]
        );
        assert_eq!(lines[0].text, "Title");
        assert_eq!(lines[2].text, "Some text more text.");
        assert_eq!(lines[4].text, "    fanya x = 1");
    }

    #[test]
    fn code_is_not_wrapped_or_parsed() {
        let src = "```\n# not a heading\n- not a list\n```";
        let lines = PlainRenderer.render(src, 10);
        assert!(lines.iter().all(|l| l.kind == LineKind::Code));
        assert_eq!(lines[0].text, "    # not a heading");
    }

    #[test]
    fn lists_get_bullets() {
        let lines = PlainRenderer.render("- one\n- two\n1. first", 40);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["• one", "• two", "1. first"]);
    }

    #[test]
    fn tables_pass_through() {
        let lines = PlainRenderer.render("| a | b |\n|---|---|", 5);
        assert_eq!(kinds(&lines), [LineKind::Table, LineKind::Table]);
        assert_eq!(lines[0].text, "| a | b |");
    }

    #[test]
    fn rules_and_quotes() {
        let lines = PlainRenderer.render("---\n> **note** this", 10);
        assert_eq!(lines[0].kind, LineKind::Rule);
        assert_eq!(lines[0].text.chars().count(), 10);
        assert_eq!(lines[1], DocLine::new(LineKind::Quote, "│ note"));
        assert_eq!(lines[2], DocLine::new(LineKind::Quote, "│ this"));
    }

    #[test]
    fn blank_runs_collapse() {
        let lines = PlainRenderer.render("a\n\n\n\nb\n\n", 20);
        assert_eq!(
            kinds(&lines),
            [LineKind::Text, LineKind::Blank, LineKind::Text]
        );
    }

    #[test]
    fn hash_without_space_is_text() {
        let lines = PlainRenderer.render("#hashtag", 20);
        assert_eq!(lines[0].kind, LineKind::Text);
    }

    #[test]
    fn every_bundled_page_renders() {
        use crate::catalog::Locale;
        use crate::docs::DocStore;
        let store = DocStore::embedded();
        for locale in Locale::ALL {
            for file in store.files(locale) {
                let body = store.get(locale, file).unwrap();
                let lines = PlainRenderer.render(body, 60);
                assert!(!lines.is_empty(), "{locale}/{file}");
                assert!(matches!(lines[0].kind, LineKind::Heading(1)));
            }
        }
    }

    // ── Inline markup ─────────────────────────────────────────────────────────

    #[test]
    fn inline_code_loses_backticks() {
        assert_eq!(strip_inline("use `fanya x = 1` here"), "use fanya x = 1 here");
        assert_eq!(strip_inline("`__init__` stays"), "__init__ stays");
        assert_eq!(strip_inline("a lone ` tick"), "a lone ` tick");
    }

    #[test]
    fn links_show_label_and_url() {
        assert_eq!(
            strip_inline("see [the **docs**](https://nuru.example/docs) now"),
            "see the docs (https://nuru.example/docs) now"
        );
        assert_eq!(strip_inline("![logo](img/logo.png) Nuru"), "logo Nuru");
        assert_eq!(strip_inline("arr[0] and [x] (y)"), "arr[0] and [x] (y)");
    }

    #[test]
    fn paragraph_with_link_wraps_as_plain_text() {
        let lines = PlainRenderer.render("Read [more](http://a.b) `now`.", 80);
        assert_eq!(lines, [DocLine::new(LineKind::Text, "Read more (http://a.b) now.")]);
    }
}
