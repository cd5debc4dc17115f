//! Interactive documentation browser.
//!
//! [`Tutor`] is a pure state machine: feed it crossterm [`Event`]s with
//! [`Tutor::handle`] and draw it with [`Tutor::render`].  Driving it on a real
//! terminal lives in [`terminal`].
//!
//! ```text
//!   LocaleSelect ──enter──▶ Contents{locale} ──enter──▶ Document{locale, page}
//!        │                      │    ▲                        │
//!      q/esc                  q/esc  └─────────q/esc/⌫────────┘
//!        ▼                      ▼
//!      Quit                   Quit
//! ```

pub mod list;
pub mod markdown;
pub mod render;
pub mod terminal;
pub mod zone;

use std::io::{self, Write};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::catalog::{Catalog, DocItem, Locale};
use crate::docs::DocStore;

pub use list::{FilterState, ListItem, ListView};
pub use markdown::{DocLine, DocRenderer, LineKind, PlainRenderer};
pub use zone::{Rect, ZoneManager};

pub const LOCALE_TITLE: &str = "Chagua Lugha";
pub const LOCALE_LIST_WIDTH: u16 = 50;
pub const LOCALE_LIST_HEIGHT: u16 = 8;

const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;
const WHEEL_LINES: usize = 3;

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub filename: String,
    source: String,
    lines: Vec<DocLine>,
    offset: usize,
}

impl Page {
    pub fn lines(&self) -> &[DocLine] {
        &self.lines
    }

    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    LocaleSelect,
    Contents { locale: Locale },
    Document { locale: Locale, page: Page },
}

pub struct Tutor {
    catalog: Catalog,
    store: DocStore,
    renderer: Box<dyn DocRenderer>,
    languages: ListView<Locale>,
    contents: ListView<DocItem>,
    view: View,
    zones: ZoneManager,
    width: u16,
    height: u16,
    doc_width: Option<u16>,
    notice: Option<String>,
}

impl Tutor {
    pub fn new(
        catalog: Catalog,
        store: DocStore,
        renderer: impl DocRenderer + 'static,
        width: u16,
        height: u16,
    ) -> Self {
        let mut languages = ListView::new(
            LOCALE_TITLE,
            Locale::ALL.to_vec(),
            LOCALE_LIST_WIDTH,
            LOCALE_LIST_HEIGHT,
        );
        languages.set_show_status_bar(false);
        languages.set_show_pagination(false);
        languages.set_show_help(false);
        languages.set_filtering_enabled(false);

        let mut tutor = Self {
            catalog,
            store,
            renderer: Box::new(renderer),
            languages,
            contents: ListView::new("", Vec::new(), width, height),
            view: View::LocaleSelect,
            zones: ZoneManager::new(),
            width,
            height,
            doc_width: None,
            notice: None,
        };
        tutor.resize(width, height);
        tutor
    }

    /// Cap the width documents are wrapped to.
    pub fn with_doc_width(mut self, width: Option<u16>) -> Self {
        self.doc_width = width;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn view(&self) -> &View {
        &self.view
    }

    /// The locale chosen so far, if any.
    pub fn locale(&self) -> Option<Locale> {
        match self.view {
            View::LocaleSelect => None,
            View::Contents { locale } | View::Document { locale, .. } => Some(locale),
        }
    }

    /// Filename of the highlighted table-of-contents entry.
    pub fn selected_filename(&self) -> Option<&str> {
        match self.view {
            View::Contents { .. } => self.contents.selected().map(DocItem::filename),
            _ => None,
        }
    }

    pub fn languages(&self) -> &ListView<Locale> {
        &self.languages
    }

    pub fn contents(&self) -> &ListView<DocItem> {
        &self.contents
    }

    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Show the table of contents for `locale`.
    pub fn choose_locale(&mut self, locale: Locale) {
        self.contents.set_items(self.catalog.items(locale).to_vec());
        self.contents.set_title(locale.contents_title());
        tracing::debug!(%locale, items = self.contents.items().len(), "locale chosen");
        self.view = View::Contents { locale };
    }

    /// Open the highlighted entry.  A missing page leaves the view alone and
    /// sets a notice.
    pub fn open_selected(&mut self) {
        let View::Contents { locale } = self.view else {
            return;
        };
        let Some(item) = self.contents.selected().cloned() else {
            return;
        };
        match self.store.get(locale, item.filename()) {
            Ok(source) => {
                let source = source.to_owned();
                let lines = self.renderer.render(&source, self.doc_columns());
                tracing::debug!(%locale, file = item.filename(), lines = lines.len(), "page opened");
                self.view = View::Document {
                    locale,
                    page: Page {
                        title: item.title().to_owned(),
                        filename: item.filename().to_owned(),
                        source,
                        lines,
                        offset: 0,
                    },
                };
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Leave a document for its table of contents.
    pub fn back(&mut self) {
        if let View::Document { locale, .. } = self.view {
            self.view = View::Contents { locale };
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let list = self.list_area();
        self.languages.set_size(
            list.width.min(LOCALE_LIST_WIDTH),
            list.height.min(LOCALE_LIST_HEIGHT),
        );
        self.contents.set_size(list.width, list.height);

        let columns = self.doc_columns();
        let body = self.body_height();
        if let View::Document { page, .. } = &mut self.view {
            page.lines = self.renderer.render(&page.source, columns);
            page.offset = page.offset.min(page.lines.len().saturating_sub(body));
        }
    }

    // ── Events ────────────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.on_key(key),
            Event::Mouse(mouse) => {
                self.on_mouse(mouse);
                Flow::Continue
            }
            Event::Resize(w, h) => {
                self.resize(w, h);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        self.notice = None;
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }
        match self.view {
            View::LocaleSelect => self.on_locale_key(key.code),
            View::Contents { .. } if self.contents.is_filtering() => {
                self.on_filter_key(key.code);
                Flow::Continue
            }
            View::Contents { .. } => self.on_contents_key(key.code),
            View::Document { .. } => {
                self.on_document_key(key.code);
                Flow::Continue
            }
        }
    }

    fn on_locale_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.languages.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.languages.cursor_down(),
            KeyCode::Home | KeyCode::Char('g') => self.languages.go_to_start(),
            KeyCode::End | KeyCode::Char('G') => self.languages.go_to_end(),
            KeyCode::Enter => {
                if let Some(&locale) = self.languages.selected() {
                    self.choose_locale(locale);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn on_contents_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.contents.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.contents.cursor_down(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => self.contents.prev_page(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => self.contents.next_page(),
            KeyCode::Home | KeyCode::Char('g') => self.contents.go_to_start(),
            KeyCode::End | KeyCode::Char('G') => self.contents.go_to_end(),
            KeyCode::Char('/') => {
                self.contents.start_filter();
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Esc if self.contents.filter_state() == FilterState::Applied => {
                self.contents.clear_filter();
            }
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn on_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.contents.push_filter_char(c),
            KeyCode::Backspace => self.contents.pop_filter_char(),
            KeyCode::Enter => self.contents.accept_filter(),
            KeyCode::Esc => self.contents.clear_filter(),
            KeyCode::Up => self.contents.cursor_up(),
            KeyCode::Down => self.contents.cursor_down(),
            _ => {}
        }
    }

    fn on_document_key(&mut self, code: KeyCode) {
        let body = self.body_height();
        match code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp | KeyCode::Char('b') => self.scroll_up(body),
            KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('f') => self.scroll_down(body),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_up(usize::MAX),
            KeyCode::End | KeyCode::Char('G') => self.scroll_down(usize::MAX),
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => match self.view {
                View::LocaleSelect => self.languages.cursor_up(),
                View::Contents { .. } => self.contents.cursor_up(),
                View::Document { .. } => self.scroll_up(WHEEL_LINES),
            },
            MouseEventKind::ScrollDown => match self.view {
                View::LocaleSelect => self.languages.cursor_down(),
                View::Contents { .. } => self.contents.cursor_down(),
                View::Document { .. } => self.scroll_down(WHEEL_LINES),
            },
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.zones.hit(mouse.column, mouse.row) else {
                    return;
                };
                tracing::trace!(index, col = mouse.column, row = mouse.row, "click");
                match self.view {
                    View::LocaleSelect => {
                        if self.languages.select(index) {
                            if let Some(&locale) = self.languages.selected() {
                                self.choose_locale(locale);
                            }
                        }
                    }
                    View::Contents { .. } => {
                        if self.contents.select(index) {
                            // A click ends query editing the way Enter does.
                            if self.contents.is_filtering() {
                                self.contents.accept_filter();
                            }
                            self.open_selected();
                        }
                    }
                    View::Document { .. } => {}
                }
            }
            _ => {}
        }
    }

    fn scroll_up(&mut self, n: usize) {
        if let View::Document { page, .. } = &mut self.view {
            page.offset = page.offset.saturating_sub(n);
        }
    }

    fn scroll_down(&mut self, n: usize) {
        let body = self.body_height();
        if let View::Document { page, .. } = &mut self.view {
            let max = page.lines.len().saturating_sub(body);
            page.offset = page.offset.saturating_add(n).min(max);
        }
    }

    // ── Geometry ──────────────────────────────────────────────────────────────

    fn list_area(&self) -> Rect {
        Rect::new(
            MARGIN_X,
            MARGIN_Y,
            self.width.saturating_sub(2 * MARGIN_X),
            self.height.saturating_sub(2 * MARGIN_Y),
        )
    }

    fn doc_columns(&self) -> usize {
        let cap = self.doc_width.unwrap_or(self.width).min(self.width);
        usize::from(cap.saturating_sub(2 * MARGIN_X))
    }

    fn body_height(&self) -> usize {
        render::body_height(self.list_area().height)
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Draw the current view and flush.  Re-marks every mouse zone.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.zones.clear();
        render::clear(out)?;
        let area = self.list_area();
        match &self.view {
            View::LocaleSelect => {
                let area = Rect::new(area.x, area.y, self.languages.width(), self.languages.height());
                render::draw_list(out, &self.languages, area, &mut self.zones)?;
            }
            View::Contents { .. } => {
                render::draw_list(out, &self.contents, area, &mut self.zones)?;
            }
            View::Document { page, .. } => {
                render::draw_document(out, &page.title, &page.lines, page.offset, area)?;
            }
        }
        if let Some(notice) = &self.notice {
            render::draw_notice(out, self.height.saturating_sub(1), self.width, notice)?;
        }
        out.flush()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
