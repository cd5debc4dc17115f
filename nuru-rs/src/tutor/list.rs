//! Selectable, paginated, filterable list used by both tutor list views.
//!
//! Each entry takes [`ITEM_HEIGHT`] rows (title, description) followed by
//! [`ITEM_SPACING`] blank rows.  The status bar, pagination dots, help line
//! and filtering can each be switched off.

use std::ops::Range;

use aho_corasick::AhoCorasickBuilder;

use super::zone::Rect;
use crate::catalog::{DocItem, Locale};

pub const ITEM_HEIGHT: u16 = 2;
pub const ITEM_SPACING: u16 = 1;

// ── ListItem ──────────────────────────────────────────────────────────────────

/// Something the list can show: a title and a one-line description.
pub trait ListItem {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
}

impl ListItem for DocItem {
    fn title(&self) -> &str {
        DocItem::title(self)
    }

    fn description(&self) -> &str {
        DocItem::description(self)
    }
}

impl ListItem for Locale {
    fn title(&self) -> &str {
        self.name()
    }

    fn description(&self) -> &str {
        Locale::description(*self)
    }
}

// ── Filter ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The user is typing a query.
    Filtering,
    /// A query has been accepted and narrows the list.
    Applied,
}

/// Indices of `items` whose title contains `query`, ignoring ASCII case.
pub fn filter_titles<T: ListItem>(items: &[T], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..items.len()).collect();
    }
    let ac = AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build([query]);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| ac.is_match(item.title()))
        .map(|(i, _)| i)
        .collect()
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where each part of a list goes inside its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub title_row: u16,
    pub filter_row: u16,
    pub status_row: Option<u16>,
    pub items: Rect,
    pub pagination_row: Option<u16>,
    pub help_row: Option<u16>,
}

// ── ListView ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ListView<T> {
    title: String,
    items: Vec<T>,
    /// Indices into `items` that pass the filter, in order.
    matches: Vec<usize>,
    /// Position within `matches`.
    cursor: usize,
    width: u16,
    height: u16,
    filter_state: FilterState,
    query: String,
    show_status_bar: bool,
    show_pagination: bool,
    show_help: bool,
    filtering_enabled: bool,
}

impl<T: ListItem> ListView<T> {
    pub fn new(title: impl Into<String>, items: Vec<T>, width: u16, height: u16) -> Self {
        let matches = (0..items.len()).collect();
        Self {
            title: title.into(),
            items,
            matches,
            cursor: 0,
            width,
            height,
            filter_state: FilterState::Unfiltered,
            query: String::new(),
            show_status_bar: true,
            show_pagination: true,
            show_help: true,
            filtering_enabled: true,
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn show_status_bar(&self) -> bool {
        self.show_status_bar
    }

    pub fn set_show_status_bar(&mut self, on: bool) {
        self.show_status_bar = on;
    }

    pub fn show_pagination(&self) -> bool {
        self.show_pagination
    }

    pub fn set_show_pagination(&mut self, on: bool) {
        self.show_pagination = on;
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn set_show_help(&mut self, on: bool) {
        self.show_help = on;
    }

    pub fn filtering_enabled(&self) -> bool {
        self.filtering_enabled
    }

    /// Disabling filtering also drops any active filter.
    pub fn set_filtering_enabled(&mut self, on: bool) {
        self.filtering_enabled = on;
        if !on {
            self.clear_filter();
        }
    }

    // ── Items ─────────────────────────────────────────────────────────────────

    /// Replace every item.  Resets the cursor and any filter.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.query.clear();
        self.filter_state = FilterState::Unfiltered;
        self.matches = (0..self.items.len()).collect();
        self.cursor = 0;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items that pass the filter.
    pub fn visible_len(&self) -> usize {
        self.matches.len()
    }

    /// `(item index, item)` for every item that passes the filter.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.matches.iter().map(move |&i| (i, &self.items[i]))
    }

    /// `(item index, item)` for the items on the current page.
    pub fn page_items(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        let range = self.page_range();
        self.matches[range].iter().map(move |&i| (i, &self.items[i]))
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Position of the cursor among the visible items.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index (into [`ListView::items`]) of the selected item.
    pub fn selected_index(&self) -> Option<usize> {
        self.matches.get(self.cursor).copied()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected_index().map(|i| &self.items[i])
    }

    /// Move the cursor to item `index`.  Returns `false` if it is filtered
    /// out or does not exist.
    pub fn select(&mut self, index: usize) -> bool {
        match self.matches.iter().position(|&i| i == index) {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            None => false,
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.matches.len() {
            self.cursor += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.per_page());
    }

    pub fn next_page(&mut self) {
        let last = self.matches.len().saturating_sub(1);
        self.cursor = (self.cursor + self.per_page()).min(last);
    }

    pub fn go_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn go_to_end(&mut self) {
        self.cursor = self.matches.len().saturating_sub(1);
    }

    // ── Pagination ────────────────────────────────────────────────────────────

    /// How many items fit on one page.  Always at least one.
    pub fn per_page(&self) -> usize {
        let rows = self.layout(Rect::new(0, 0, self.width, self.height)).items.height;
        usize::from((rows + ITEM_SPACING) / (ITEM_HEIGHT + ITEM_SPACING)).max(1)
    }

    /// Zero-based page holding the cursor.
    pub fn page(&self) -> usize {
        self.cursor / self.per_page()
    }

    pub fn total_pages(&self) -> usize {
        self.matches.len().div_ceil(self.per_page()).max(1)
    }

    /// Positions (within the visible items) shown on the current page.
    pub fn page_range(&self) -> Range<usize> {
        let per = self.per_page();
        let start = (self.page() * per).min(self.matches.len());
        let end = (start + per).min(self.matches.len());
        start..end
    }

    // ── Filtering ─────────────────────────────────────────────────────────────

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// `true` while the user is typing a query.
    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    /// Enter query-editing mode.  Returns `false` if filtering is disabled.
    pub fn start_filter(&mut self) -> bool {
        if !self.filtering_enabled {
            return false;
        }
        self.filter_state = FilterState::Filtering;
        true
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_filter_char(&mut self) {
        self.query.pop();
        self.refilter();
    }

    /// Stop editing, keeping the query if it is non-empty.
    pub fn accept_filter(&mut self) {
        self.filter_state = if self.query.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Applied
        };
    }

    pub fn clear_filter(&mut self) {
        self.query.clear();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
    }

    fn refilter(&mut self) {
        let keep = self.selected_index();
        self.matches = filter_titles(&self.items, &self.query);
        self.cursor = keep
            .and_then(|i| self.matches.iter().position(|&m| m == i))
            .unwrap_or(0);
    }

    // ── Chrome ────────────────────────────────────────────────────────────────

    pub fn status_text(&self) -> String {
        let total = self.items.len();
        let noun = if total == 1 { "item" } else { "items" };
        match (total, self.filter_state) {
            (0, _) => "No items".to_owned(),
            (_, FilterState::Unfiltered) => format!("{total} {noun}"),
            _ => format!("{} of {total} {noun}", self.matches.len()),
        }
    }

    pub fn help_text(&self) -> String {
        if self.is_filtering() {
            return "enter apply • esc cancel".to_owned();
        }
        let mut parts = vec!["↑/k up", "↓/j down"];
        if self.total_pages() > 1 {
            parts.push("←/h →/l page");
        }
        if self.filtering_enabled {
            parts.push(if self.filter_state == FilterState::Applied {
                "esc clear filter"
            } else {
                "/ filter"
            });
        }
        parts.extend(["enter select", "q quit"]);
        parts.join(" • ")
    }

    /// Pagination dots: `•` for the current page, `○` for the others.
    pub fn pagination_text(&self) -> String {
        let total = self.total_pages();
        if total > usize::from(self.width) / 2 {
            return format!("{}/{total}", self.page() + 1);
        }
        (0..total)
            .map(|p| if p == self.page() { "•" } else { "○" })
            .collect()
    }

    /// Split `area` into the list's parts.
    pub fn layout(&self, area: Rect) -> ListLayout {
        let mut top = area.y;
        let title_row = top;
        let filter_row = top.saturating_add(1);
        top = top.saturating_add(2);

        let status_row = if self.show_status_bar {
            let row = top;
            top = top.saturating_add(2);
            Some(row)
        } else {
            None
        };

        let mut bottom = area.bottom();
        let help_row = if self.show_help {
            bottom = bottom.saturating_sub(1);
            Some(bottom)
        } else {
            None
        };
        let pagination_row = if self.show_pagination {
            bottom = bottom.saturating_sub(1);
            Some(bottom)
        } else {
            None
        };

        ListLayout {
            title_row,
            filter_row,
            status_row,
            items: Rect::new(area.x, top, area.width, bottom.saturating_sub(top)),
            pagination_row,
            help_row,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
