//! Drawing tutor views with crossterm.
//!
//! Everything is queued into a generic writer; the caller flushes.  List rows
//! are marked in the [`ZoneManager`] as they are drawn so mouse clicks can be
//! mapped back to items.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Attributes, Color, ContentStyle, Print, ResetColor, SetStyle},
    terminal::{self, ClearType},
};

use super::list::{FilterState, ListItem, ListView, ITEM_HEIGHT, ITEM_SPACING};
use super::markdown::{DocLine, LineKind};
use super::zone::{Rect, ZoneManager};

// ── Palette ───────────────────────────────────────────────────────────────────

const TITLE_FG: Color = Color::AnsiValue(230);
const TITLE_BG: Color = Color::AnsiValue(62);
const SELECTED: Color = Color::AnsiValue(170);
const SELECTED_DIM: Color = Color::AnsiValue(176);
const MUTED: Color = Color::AnsiValue(241);
const HEADING: Color = Color::AnsiValue(212);
const CODE: Color = Color::AnsiValue(245);

fn style(fg: Option<Color>, bg: Option<Color>, attrs: &[Attribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = fg;
    style.background_color = bg;
    let mut attributes = Attributes::default();
    for &a in attrs {
        attributes.set(a);
    }
    style.attributes = attributes;
    style
}

fn title_style() -> ContentStyle {
    style(Some(TITLE_FG), Some(TITLE_BG), &[Attribute::Bold])
}

fn muted() -> ContentStyle {
    style(Some(MUTED), None, &[])
}

/// Style for one rendered document line.
pub fn line_style(kind: LineKind) -> ContentStyle {
    match kind {
        LineKind::Heading(1) => style(Some(HEADING), None, &[Attribute::Bold, Attribute::Underlined]),
        LineKind::Heading(_) => style(Some(HEADING), None, &[Attribute::Bold]),
        LineKind::Code => style(Some(CODE), None, &[]),
        LineKind::Quote => style(Some(MUTED), None, &[Attribute::Italic]),
        LineKind::Rule => muted(),
        LineKind::Text | LineKind::Table | LineKind::Blank => ContentStyle::new(),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Cut `text` to `width` columns, ending in `…` if anything was dropped.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, text: &str, style: ContentStyle) -> io::Result<()> {
    queue!(out, cursor::MoveTo(col, row), SetStyle(style), Print(text), ResetColor)
}

pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
}

// ── Lists ─────────────────────────────────────────────────────────────────────

pub fn draw_list<T: ListItem, W: Write>(
    out: &mut W,
    list: &ListView<T>,
    area: Rect,
    zones: &mut ZoneManager,
) -> io::Result<()> {
    let layout = list.layout(area);
    let width = usize::from(area.width);

    put(out, area.x, layout.title_row, &truncate(&format!(" {} ", list.title()), width), title_style())?;

    if list.filter_state() == FilterState::Filtering {
        let prompt = format!("Filter: {}█", list.query());
        put(out, area.x, layout.filter_row, &truncate(&prompt, width), ContentStyle::new())?;
    }

    if let Some(row) = layout.status_row {
        let mut status = list.status_text();
        if list.filter_state() == FilterState::Applied {
            status = format!("“{}” {status}", list.query());
        }
        put(out, area.x, row, &truncate(&status, width), muted())?;
    }

    if list.visible_len() == 0 && layout.items.height > 0 {
        put(out, area.x, layout.items.y, "No items.", muted())?;
    }

    let step = ITEM_HEIGHT + ITEM_SPACING;
    let selected = list.selected_index();
    for (n, (index, item)) in list.page_items().enumerate() {
        let y = layout.items.y.saturating_add(step.saturating_mul(n as u16));
        if y.saturating_add(ITEM_HEIGHT) > layout.items.bottom() {
            break;
        }
        zones.mark(index, Rect::new(area.x, y, area.width, ITEM_HEIGHT));

        let (bar, title, desc) = if Some(index) == selected {
            (
                "│ ",
                style(Some(SELECTED), None, &[Attribute::Bold]),
                style(Some(SELECTED_DIM), None, &[]),
            )
        } else {
            ("  ", ContentStyle::new(), muted())
        };
        put(out, area.x, y, &truncate(&format!("{bar}{}", item.title()), width), title)?;
        put(out, area.x, y + 1, &truncate(&format!("{bar}{}", item.description()), width), desc)?;
    }

    if let Some(row) = layout.pagination_row {
        if list.total_pages() > 1 {
            put(out, area.x, row, &list.pagination_text(), muted())?;
        }
    }
    if let Some(row) = layout.help_row {
        put(out, area.x, row, &truncate(&list.help_text(), width), muted())?;
    }
    Ok(())
}

// ── Documents ─────────────────────────────────────────────────────────────────

const DOC_HELP: &str = "↑/k ↓/j scroll • space/b page • q back";

/// Rows of document body that fit in an area `height` rows tall
/// (title, gap, body, footer).
pub fn body_height(height: u16) -> usize {
    usize::from(height.saturating_sub(3)).max(1)
}

/// How far through the document the view is, as a whole percentage.
pub fn scroll_percent(total: usize, offset: usize, body: usize) -> usize {
    let max = total.saturating_sub(body);
    if max == 0 {
        100
    } else {
        offset.min(max) * 100 / max
    }
}

pub fn draw_document<W: Write>(
    out: &mut W,
    title: &str,
    lines: &[DocLine],
    offset: usize,
    area: Rect,
) -> io::Result<()> {
    let width = usize::from(area.width);
    put(out, area.x, area.y, &truncate(&format!(" {title} "), width), title_style())?;

    let body = body_height(area.height);
    let top = area.y.saturating_add(2);
    for (n, line) in lines.iter().skip(offset).take(body).enumerate() {
        let row = top.saturating_add(n as u16);
        put(out, area.x, row, &truncate(&line.text, width), line_style(line.kind))?;
    }

    let footer_row = area.bottom().saturating_sub(1);
    let percent = format!("{:>3}%", scroll_percent(lines.len(), offset, body));
    let room = width.saturating_sub(percent.len() + 1);
    let footer = format!("{:<room$} {percent}", truncate(DOC_HELP, room));
    put(out, area.x, footer_row, &truncate(&footer, width), muted())
}

/// A one-line message on the bottom row.
pub fn draw_notice<W: Write>(out: &mut W, row: u16, width: u16, text: &str) -> io::Result<()> {
    put(
        out,
        0,
        row,
        &truncate(text, usize::from(width)),
        style(Some(Color::Red), None, &[Attribute::Bold]),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Locale;

    fn text(buf: &[u8]) -> String {
        String::from_utf8_lossy(buf).into_owned()
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 4), "hel…");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn percent_bounds() {
        assert_eq!(scroll_percent(10, 0, 20), 100);
        assert_eq!(scroll_percent(30, 0, 10), 0);
        assert_eq!(scroll_percent(30, 10, 10), 50);
        assert_eq!(scroll_percent(30, 99, 10), 100);
    }

    #[test]
    fn body_height_never_zero() {
        assert_eq!(body_height(0), 1);
        assert_eq!(body_height(24), 21);
    }

    #[test]
    fn list_marks_a_zone_per_visible_row() {
        let mut list = ListView::new("Chagua Lugha", Locale::ALL.to_vec(), 50, 8);
        list.set_show_status_bar(false);
        list.set_show_pagination(false);
        list.set_show_help(false);
        list.set_filtering_enabled(false);

        let mut zones = ZoneManager::new();
        let mut buf = Vec::new();
        draw_list(&mut buf, &list, Rect::new(2, 1, 50, 8), &mut zones).unwrap();

        assert_eq!(zones.len(), 2);
        assert_eq!(zones.get(&zones.id(0)), Some(Rect::new(2, 3, 50, 2)));
        assert_eq!(zones.get(&zones.id(1)), Some(Rect::new(2, 6, 50, 2)));

        let out = text(&buf);
        assert!(out.contains("Chagua Lugha"));
        assert!(out.contains("│ Kiswahili"));
        assert!(out.contains("  English"));
    }

    #[test]
    fn empty_list_says_so() {
        let list: ListView<Locale> = ListView::new("Empty", Vec::new(), 40, 12);
        let mut zones = ZoneManager::new();
        let mut buf = Vec::new();
        draw_list(&mut buf, &list, Rect::new(0, 0, 40, 12), &mut zones).unwrap();
        assert!(zones.is_empty());
        let out = text(&buf);
        assert!(out.contains("No items."));
        assert!(out.contains("No items"));
    }

    #[test]
    fn document_shows_window_and_percent() {
        let lines: Vec<DocLine> = (0..50)
            .map(|i| DocLine::new(LineKind::Text, format!("line {i}")))
            .collect();
        let mut buf = Vec::new();
        draw_document(&mut buf, "Arrays", &lines, 5, Rect::new(0, 0, 60, 13)).unwrap();
        let out = text(&buf);
        assert!(out.contains(" Arrays "));
        assert!(out.contains("line 5"));
        assert!(out.contains("line 14"));
        assert!(!out.contains("line 15"));
        assert!(!out.contains("line 4"));
        assert!(out.contains("12%"));
    }
}
