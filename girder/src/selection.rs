//! Single-selection state keyed by record identity.

/// Tracks at most one selected record key.
///
/// Selection is keyed, not positional, and is independent of transient
/// visibility: filtering the selected record out of view leaves the
/// selection intact, so re-widening the filter re-reveals the highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState<K> {
    selected: Option<K>,
}

impl<K: Clone + Eq> SelectionState<K> {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// Selects `key`, silently replacing any prior selection. Re-selecting
    /// the current key is a no-op, not a toggle; deselection goes through
    /// [`clear`](Self::clear). Returns `true` if the selection changed.
    pub fn select(&mut self, key: K) -> bool {
        if self.selected.as_ref() == Some(&key) {
            return false;
        }
        self.selected = Some(key);
        true
    }

    /// Check if `key` is the current selection.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.as_ref() == Some(key)
    }

    /// Returns the selected key, if any.
    pub fn selected(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}
