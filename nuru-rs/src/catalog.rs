//! Documentation catalog: the selectable entries for each locale.
//!
//! A [`Catalog`] is plain immutable data.  The binary builds the stock one
//! with [`Catalog::builtin`] and hands it to the tutor; tests build their own.

use std::collections::HashMap;
use std::fmt;

// ── Locale ────────────────────────────────────────────────────────────────────

/// A documentation language.  Each locale has its own subtree in the
/// [`DocStore`](crate::docs::DocStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Swahili,
    English,
}

impl Locale {
    /// All locales, in the order the tutor offers them.
    pub const ALL: [Locale; 2] = [Locale::Swahili, Locale::English];

    /// Directory name under `docs/`.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Swahili => "sw",
            Locale::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Name shown in the language picker.
    pub fn name(self) -> &'static str {
        match self {
            Locale::Swahili => "Kiswahili",
            Locale::English => "English",
        }
    }

    /// One-line description shown under [`Locale::name`].
    pub fn description(self) -> &'static str {
        match self {
            Locale::Swahili => "Soma nyaraka kwa Kiswahili",
            Locale::English => "Read documentation in English",
        }
    }

    /// Title of the table of contents in this locale.
    pub fn contents_title(self) -> &'static str {
        match self {
            Locale::Swahili => "Yaliyomo",
            Locale::English => "Table of Contents",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── DocItem ───────────────────────────────────────────────────────────────────

/// One entry in a table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocItem {
    title: String,
    description: String,
    filename: String,
}

impl DocItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            filename: filename.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// File name within the locale's subtree of the doc store.
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Locale, Vec<DocItem>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entries for `locale`, replacing any previous ones.
    pub fn with(mut self, locale: Locale, items: Vec<DocItem>) -> Self {
        self.entries.insert(locale, items);
        self
    }

    /// Entries for `locale`, in display order.  Empty if none were given.
    pub fn items(&self, locale: Locale) -> &[DocItem] {
        self.entries.get(&locale).map_or(&[], Vec::as_slice)
    }

    /// The stock catalog matching the embedded documentation.
    pub fn builtin() -> Self {
        Self::new()
            .with(Locale::English, english_items())
            .with(Locale::Swahili, swahili_items())
    }
}

fn english_items() -> Vec<DocItem> {
    [
        ("Arrays", "🚀 Unleash the power of arrays in Nuru", "arrays.md"),
        ("Booleans", "👍👎 Master the world of 'if' and 'else' with bools", "bool.md"),
        ("Builtins", "💡 Reveal the secrets of builtin functions in Nuru", "builtins.md"),
        ("Comments", "💬 Speak your mind with comments in Nuru", "comments.md"),
        ("Dictionaries", "📚 Unlock the knowledge of dictionaries in Nuru", "dictionaries.md"),
        ("For", "🔄 Loop like a pro with 'for' in Nuru", "for.md"),
        ("Function", "🔧 Create powerful functions in Nuru", "function.md"),
        ("Identifiers", "🔖 Give your variables their own identity in Nuru", "identifiers.md"),
        ("If Statements", "🔮 Control the flow with 'if' statements in Nuru", "ifStatements.md"),
        ("Keywords", "🔑 Learn the secret language of Nuru's keywords", "keywords.md"),
        ("Null", "🌌 Embrace the void with Null in Nuru", "null.md"),
        ("Numbers", "🔢 Discover the magic of numbers in Nuru", "numbers.md"),
        ("Operators", "🧙 Perform spells with Nuru's operators", "operators.md"),
        ("Strings", "🎼 Compose stories with strings in Nuru", "strings.md"),
        ("Switch", "🧭 Navigate complex scenarios with 'switch' in Nuru", "switch.md"),
        ("While", "⌛ Learn the art of patience with 'while' loops in Nuru", "while.md"),
    ]
    .into_iter()
    .map(|(title, desc, file)| DocItem::new(title, desc, file))
    .collect()
}

fn swahili_items() -> Vec<DocItem> {
    vec![DocItem::new(
        "Maoni Katika Nuru",
        "💬 Toa mawazo yako na maoni (comments) katika Nuru",
        "comments.md",
    )]
}
