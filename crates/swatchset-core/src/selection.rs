//! Ephemeral multi-segment selection.
//!
//! Selection is never persisted. It only refers to segments of the active set;
//! the store prunes ids as segments disappear and clears it on set switches.

/// Selected segment ids plus the selection-mode flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected ids in the order they were selected. No duplicates.
    selected: Vec<String>,
    /// Whether bulk selection is enabled.
    mode: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether selection mode is active.
    pub fn is_active(&self) -> bool {
        self.mode
    }

    /// Flip selection mode. Leaving selection mode clears the selection.
    pub fn toggle_mode(&mut self) {
        if self.mode {
            self.selected.clear();
        }
        self.mode = !self.mode;
    }

    /// Add `id` if absent, remove it otherwise.
    /// Returns true if the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    /// Replace the selection with the given ids.
    pub fn replace_with<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        for id in ids {
            let id = id.into();
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
    }

    /// Drop a single id.
    pub fn remove(&mut self, id: &str) {
        self.selected.retain(|s| s != id);
    }

    /// Keep only ids accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.selected.retain(|s| keep(s));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_leaving_mode_clears() {
        let mut selection = SelectionState::new();
        selection.toggle_mode();
        assert!(selection.is_active());
        selection.toggle("a");
        selection.toggle_mode();
        assert!(!selection.is_active());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_entering_mode_keeps_selection() {
        let mut selection = SelectionState::new();
        selection.toggle("a");
        selection.toggle_mode();
        assert!(selection.contains("a"));
    }

    #[test]
    fn test_replace_dedupes() {
        let mut selection = SelectionState::new();
        selection.replace_with(["a", "b", "a"]);
        assert_eq!(selection.ids(), ["a", "b"]);
    }
}
