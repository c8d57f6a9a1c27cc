use std::collections::BTreeSet;

/// Selection remembered by the last select-all, so that an immediate
/// second select-all can put it back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SelectAllUndo {
    candidates: BTreeSet<String>,
    previous: BTreeSet<String>,
}

/// Tracks selected record identifiers.
///
/// The tracker only ever sees identifiers, never records. Identifiers
/// that drop out of the current view are kept; callers pass the view's
/// identifiers to the completeness checks so stale entries never count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<String>,
    undo: Option<SelectAllUndo>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the selection of one identifier
    pub fn toggle(&mut self, id: &str) {
        self.undo = None;
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Header-checkbox semantics: when every candidate is already
    /// selected they are all deselected, otherwise they are all added.
    ///
    /// Returns whether the selection changed.
    pub fn select_all<S: AsRef<str>>(&mut self, candidate_ids: &[S]) -> bool {
        let candidates: BTreeSet<String> = candidate_ids
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        if candidates.is_empty() {
            return false;
        }

        if candidates.is_subset(&self.selected) {
            match self.undo.take() {
                Some(undo) if undo.candidates == candidates => {
                    self.selected = undo.previous;
                }
                Some(_) | None => {
                    self.selected.retain(|id| !candidates.contains(id));
                }
            }
        } else {
            self.undo = Some(SelectAllUndo {
                candidates: candidates.clone(),
                previous: self.selected.clone(),
            });
            self.selected.extend(candidates);
        }
        true
    }

    pub fn clear(&mut self) {
        self.undo = None;
        self.selected.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// True when `candidate_ids` is non-empty and fully selected
    #[must_use]
    pub fn is_all_selected<S: AsRef<str>>(&self, candidate_ids: &[S]) -> bool {
        !candidate_ids.is_empty()
            && candidate_ids.iter().all(|id| self.is_selected(id.as_ref()))
    }

    /// Selected identifiers, sorted
    #[must_use]
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Selected identifiers that are also among `candidate_ids`, in
    /// candidate order
    #[must_use]
    pub fn selected_in<S: AsRef<str>>(&self, candidate_ids: &[S]) -> Vec<String> {
        candidate_ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| self.is_selected(id))
            .map(str::to_string)
            .collect()
    }

    /// Drops every identifier not among `candidate_ids`
    pub fn prune_to<S: AsRef<str>>(&mut self, candidate_ids: &[S]) {
        let keep: BTreeSet<&str> =
            candidate_ids.iter().map(AsRef::as_ref).collect();
        self.undo = None;
        self.selected.retain(|id| keep.contains(id.as_str()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn test_toggle() {
        let mut selection = SelectionTracker::new();
        selection.toggle("a");
        assert!(selection.is_selected("a"));
        selection.toggle("a");
        assert!(!selection.is_selected("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_adds_missing_then_clears() {
        let mut selection = SelectionTracker::new();
        selection.toggle("b");
        assert!(selection.select_all(&PAGE));
        assert!(selection.is_all_selected(&PAGE));
        assert_eq!(selection.len(), 3);
        selection.toggle("a");
        selection.toggle("a");
        assert!(selection.select_all(&PAGE));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_twice_restores_previous_selection() {
        let starts: [&[&str]; 4] = [&[], &["b"], &["a", "z"], &["a", "b", "c"]];
        for start in starts {
            let mut selection = SelectionTracker::new();
            for id in start {
                selection.toggle(id);
            }
            let before = selection.selected_ids();
            selection.select_all(&PAGE);
            selection.select_all(&PAGE);
            assert_eq!(selection.selected_ids(), before, "start {start:?}");
        }
    }

    #[test]
    fn test_select_all_with_no_candidates_is_a_no_op() {
        let mut selection = SelectionTracker::new();
        selection.toggle("a");
        let none: [&str; 0] = [];
        assert!(!selection.select_all(&none));
        assert!(!selection.is_all_selected(&none));
        assert_eq!(selection.selected_ids(), ["a"]);
    }

    #[test]
    fn test_stale_ids_do_not_count_towards_completeness() {
        let mut selection = SelectionTracker::new();
        selection.toggle("gone");
        selection.toggle("a");
        assert!(!selection.is_all_selected(&PAGE));
        assert_eq!(selection.selected_in(&PAGE), ["a"]);
        assert!(selection.is_selected("gone"));
        selection.prune_to(&PAGE);
        assert_eq!(selection.selected_ids(), ["a"]);
    }
}
