//! Embedded documentation store.
//!
//! Every markdown file under `docs/<locale>/` is baked into the binary at
//! compile time via `include_str!()`, so the tutor needs no installed files.
//! Documents are addressed by locale and bare filename (`"arrays.md"`).

use std::borrow::Cow;
use std::collections::HashMap;

use crate::catalog::Locale;
use crate::error::{Error, Result};

/// A single embedded document.
pub struct EmbeddedDoc {
    pub locale: Locale,
    pub name: &'static str,
    pub content: &'static str,
}

macro_rules! doc {
    ($locale:expr, $dir:literal, $name:literal) => {
        EmbeddedDoc {
            locale: $locale,
            name: $name,
            content: include_str!(concat!("../docs/", $dir, "/", $name)),
        }
    };
}

/// All embedded documents.
pub static EMBEDDED_DOCS: &[EmbeddedDoc] = &[
    doc!(Locale::English, "en", "arrays.md"),
    doc!(Locale::English, "en", "bool.md"),
    doc!(Locale::English, "en", "builtins.md"),
    doc!(Locale::English, "en", "comments.md"),
    doc!(Locale::English, "en", "dictionaries.md"),
    doc!(Locale::English, "en", "for.md"),
    doc!(Locale::English, "en", "function.md"),
    doc!(Locale::English, "en", "identifiers.md"),
    doc!(Locale::English, "en", "ifStatements.md"),
    doc!(Locale::English, "en", "keywords.md"),
    doc!(Locale::English, "en", "null.md"),
    doc!(Locale::English, "en", "numbers.md"),
    doc!(Locale::English, "en", "operators.md"),
    doc!(Locale::English, "en", "strings.md"),
    doc!(Locale::English, "en", "switch.md"),
    doc!(Locale::English, "en", "while.md"),
    doc!(Locale::Swahili, "sw", "comments.md"),
];

/// Read-only document tree, partitioned by locale.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    docs: HashMap<(Locale, String), Cow<'static, str>>,
}

impl DocStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The documents compiled into the binary.
    pub fn embedded() -> Self {
        let docs = EMBEDDED_DOCS
            .iter()
            .map(|d| ((d.locale, d.name.to_owned()), Cow::Borrowed(d.content)))
            .collect();
        Self { docs }
    }

    /// Add (or replace) a document.
    pub fn with(
        mut self,
        locale: Locale,
        name: impl Into<String>,
        content: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.docs.insert((locale, name.into()), content.into());
        self
    }

    /// Look up `filename` in the `locale` subtree.
    pub fn get(&self, locale: Locale, filename: &str) -> Result<&str> {
        match self.docs.get(&(locale, filename.to_owned())) {
            Some(content) => {
                tracing::debug!(%locale, filename, "doc lookup");
                Ok(content.as_ref())
            }
            None => Err(Error::DocNotFound { locale, filename: filename.to_owned() }),
        }
    }

    /// File names in the `locale` subtree, sorted.
    pub fn files(&self, locale: Locale) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .docs
            .keys()
            .filter(|(l, _)| *l == locale)
            .map(|(_, n)| n.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
