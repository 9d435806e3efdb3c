//! Input history with substring search.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MAX_ENTRIES: usize = 100;

/// Previously submitted inputs, newest first.
#[derive(Debug, Clone, Default)]
pub struct InputHistory {
    entries: Vec<String>,
    /// Position of the last returned entry while browsing.
    cursor: Option<usize>,
    path: Option<PathBuf>,
}

impl InputHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`; missing or corrupt files start empty.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<Vec<String>>(&text).unwrap_or_else(|e| {
                warn!("Ignoring corrupt history file {}: {e}", path.display());
                Vec::new()
            }),
            Err(e) => {
                debug!("No history at {}: {e}", path.display());
                Vec::new()
            }
        };
        Self {
            entries,
            cursor: None,
            path: Some(path),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `text` as the newest entry. Blank input is ignored.
    pub fn add(&mut self, text: &str) {
        self.reset_iterator();
        if text.trim().is_empty() {
            return;
        }
        self.entries.retain(|e| e != text);
        self.entries.insert(0, text.to_string());
        self.entries.truncate(MAX_ENTRIES);
        self.save();
    }

    pub fn reset_iterator(&mut self) {
        self.cursor = None;
    }

    /// The next older entry containing `filter`.
    pub fn next(&mut self, filter: &str) -> Option<String> {
        let start = self.cursor.map_or(0, |c| c + 1);
        let found = (start..self.entries.len()).find(|&i| matches(&self.entries[i], filter))?;
        self.cursor = Some(found);
        Some(self.entries[found].clone())
    }

    /// The next newer entry containing `filter`. Returns `None` and stops
    /// browsing once past the newest one.
    pub fn previous(&mut self, filter: &str) -> Option<String> {
        let end = self.cursor?;
        match (0..end).rev().find(|&i| matches(&self.entries[i], filter)) {
            Some(found) => {
                self.cursor = Some(found);
                Some(self.entries[found].clone())
            }
            None => {
                self.cursor = None;
                None
            }
        }
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let result = serde_json::to_string(&self.entries)
            .map_err(crate::Error::from)
            .and_then(|text| {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, text)?;
                Ok(())
            });
        if let Err(e) = result {
            warn!("Failed to save history {}: {e}", path.display());
        }
    }
}

fn matches(entry: &str, filter: &str) -> bool {
    filter.is_empty() || entry.to_lowercase().contains(&filter.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn history(entries: &[&str]) -> InputHistory {
        let mut h = InputHistory::new();
        for e in entries.iter().rev() {
            h.add(e);
        }
        h
    }

    #[test]
    fn test_add_dedupes_and_puts_newest_first() {
        let mut h = history(&["b", "a"]);
        h.add("a");
        h.add("  ");
        assert_eq!(h.entries(), ["a", "b"]);
    }

    #[test]
    fn test_browse_older_then_newer() {
        let mut h = history(&["three", "two", "one"]);
        assert_eq!(h.next("").as_deref(), Some("three"));
        assert_eq!(h.next("").as_deref(), Some("two"));
        assert_eq!(h.next("").as_deref(), Some("one"));
        assert_eq!(h.next(""), None);
        assert_eq!(h.previous("").as_deref(), Some("two"));
        assert_eq!(h.previous("").as_deref(), Some("three"));
        assert_eq!(h.previous(""), None);
        assert_eq!(h.next("").as_deref(), Some("three"));
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut h = history(&["Firefox", "files", "terminal"]);
        assert_eq!(h.next("FI").as_deref(), Some("Firefox"));
        assert_eq!(h.next("FI").as_deref(), Some("files"));
        assert_eq!(h.next("FI"), None);
    }

    #[test]
    fn test_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let mut h = InputHistory::load(&path);
        h.add("calc 1+1");

        let reloaded = InputHistory::load(&path);
        assert_eq!(reloaded.entries(), ["calc 1+1"]);
    }
}
