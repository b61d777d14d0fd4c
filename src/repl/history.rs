//! Session history of submitted lines

use std::sync::{Arc, PoisonError, RwLock};

/// Append-only record of every line submitted in this session.
///
/// Entries are kept in submission order and are never removed, reordered or
/// deduplicated. Clones share the same entries, so the dispatch loop can
/// write while the line editor recalls from the same store.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Arc<RwLock<Vec<String>>>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line
    pub fn push(&self, line: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    /// Snapshot of all entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.read(|entries| entries.to_vec())
    }

    /// Entries from `start` on, oldest first
    pub fn entries_from(&self, start: usize) -> Vec<String> {
        self.read(|entries| entries.get(start..).map(<[String]>::to_vec).unwrap_or_default())
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<String> {
        self.read(|entries| entries.get(index).cloned())
    }

    /// Most recent entry
    pub fn last(&self) -> Option<String> {
        self.read(|entries| entries.last().cloned())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.read(<[String]>::len)
    }

    /// True if nothing has been submitted yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T>(&self, f: impl FnOnce(&[String]) -> T) -> T {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_submission_order_and_duplicates() {
        let history = History::new();
        history.push("get database");
        history.push("get database");
        history.push("exit");

        assert_eq!(history.len(), 3);
        assert_eq!(history.entries(), &["get database", "get database", "exit"]);
        assert_eq!(history.last().as_deref(), Some("exit"));
    }

    #[test]
    fn test_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
        assert!(history.entries_from(0).is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let history = History::new();
        let view = history.clone();
        history.push("");
        history.push("get user");

        assert_eq!(view.entries(), &["", "get user"]);
        assert_eq!(view.get(1).as_deref(), Some("get user"));
        assert_eq!(view.entries_from(1), &["get user"]);
        assert_eq!(view.entries_from(5), Vec::<String>::new());
    }
}
