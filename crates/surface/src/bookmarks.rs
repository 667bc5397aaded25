//! Bookmark list
//!
//! Named URL entries shown on the launcher screen. A handful of built-in
//! defaults, optionally extended from the config file.

use serde::{Deserialize, Serialize};

/// One named bookmark entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Display name
    pub name: String,
    /// Destination URL
    pub url: String,
}

impl Bookmark {
    /// Create a bookmark entry
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Ordered bookmark collection
#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    entries: Vec<Bookmark>,
}

impl Bookmarks {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in launcher entries
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                Bookmark::new("Example", "https://example.com/"),
                Bookmark::new("Rust", "https://www.rust-lang.org/"),
                Bookmark::new("Wikipedia", "https://www.wikipedia.org/"),
                Bookmark::new("Weather", "https://www.eltiempo.es/"),
            ],
        }
    }

    /// Look up a bookmark's URL by display name (case-insensitive)
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .map(|b| b.url.as_str())
    }

    /// Append an entry
    pub fn add(&mut self, bookmark: Bookmark) {
        self.entries.push(bookmark);
    }

    /// Iterate entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
