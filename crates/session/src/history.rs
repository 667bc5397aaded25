//! Back/forward history
//!
//! A cursor over the URLs a session has committed, for the host's
//! back/forward controls.

use url::Url;

/// Visited-URL stack with a back/forward cursor
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Vec<Url>,
    /// Index of the current entry; `None` while empty
    cursor: Option<usize>,
}

impl SessionHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry the cursor is on, if any
    pub fn current(&self) -> Option<&Url> {
        self.cursor.map(|i| &self.entries[i])
    }

    /// True if `back` would move
    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// True if `forward` would move
    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(i) if i + 1 < self.entries.len())
    }

    /// Commit a navigation, discarding any forward entries
    pub fn push(&mut self, url: Url) {
        if let Some(i) = self.cursor {
            self.entries.truncate(i + 1);
        }
        self.entries.push(url);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move the cursor back, returning the URL to reload
    pub fn back(&mut self) -> Option<&Url> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                Some(&self.entries[i - 1])
            }
            _ => None,
        }
    }

    /// Move the cursor forward, returning the URL to reload
    pub fn forward(&mut self) -> Option<&Url> {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                Some(&self.entries[i + 1])
            }
            _ => None,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been committed yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_empty() {
        let mut history = SessionHistory::new();
        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(history.back().is_none());
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_push_moves_cursor() {
        let mut history = SessionHistory::new();
        history.push(url("https://a.example/"));
        history.push(url("https://b.example/"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().as_str(), "https://b.example/");
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = SessionHistory::new();
        history.push(url("https://a.example/"));
        history.push(url("https://b.example/"));

        assert_eq!(history.back().unwrap().as_str(), "https://a.example/");
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());

        assert_eq!(history.forward().unwrap().as_str(), "https://b.example/");
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = SessionHistory::new();
        history.push(url("https://a.example/"));
        history.push(url("https://b.example/"));
        history.push(url("https://c.example/"));
        history.back();
        history.back();

        history.push(url("https://d.example/"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().as_str(), "https://d.example/");
        assert!(!history.can_go_forward());
        assert_eq!(history.back().unwrap().as_str(), "https://a.example/");
    }

    #[test]
    fn test_back_at_start_stays_put() {
        let mut history = SessionHistory::new();
        history.push(url("https://a.example/"));
        assert!(history.back().is_none());
        assert_eq!(history.current().unwrap().as_str(), "https://a.example/");
    }
}
