use crate::route::DEFAULT_PATH;

/// Address bar and session history as seen by the router.
pub trait History {
    /// Path currently shown in the address bar.
    fn current_path(&self) -> String;

    /// Add a new entry for `path` without reloading the page.
    fn push(&mut self, path: &str);
}

/// In-memory session history.
///
/// Mirrors browser semantics: `push` drops any forward entries, `back` and
/// `forward` move the pointer and return the new current path. Moving the
/// pointer does not notify anyone; deliver [`NavEvent::PopState`] to the
/// router afterwards, as the browser does with `popstate`.
///
/// [`NavEvent::PopState`]: crate::NavEvent::PopState
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// History with a single entry at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            entries: vec![path.into()],
            index: 0,
        }
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a history always holds its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
    }
}
