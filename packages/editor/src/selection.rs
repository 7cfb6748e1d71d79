//! Per-session selection state for directives.
//!
//! Tracks, per authored id: focus, open/closed state for popover-style
//! directives, and externally observed order. Entries live from editor mount
//! to unmount and are never persisted. Observed order is supplied by an
//! external layer (the animation timeline) and may diverge from document
//! position: document order is not playback order for animation directives.

use std::collections::HashMap;

use chalkmark_common::AuthoredId;

/// Ephemeral per-directive UI state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionEntry {
    pub focused: bool,
    pub open: bool,
    /// Timeline position supplied externally, not derived from the document
    pub observed_order: Option<u32>,
}

/// Session-scoped selection registry, one writer (the UI thread)
#[derive(Debug, Default)]
pub struct SelectionTracker {
    entries: HashMap<AuthoredId, SelectionEntry>,
    /// At most one open label per anchor image
    open_by_anchor: HashMap<String, AuthoredId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directive's editor mounted
    pub fn mount(&mut self, id: AuthoredId) {
        self.entries.entry(id).or_default();
    }

    /// A directive's editor unmounted; its state is discarded
    pub fn unmount(&mut self, id: &AuthoredId) {
        self.entries.remove(id);
        self.open_by_anchor.retain(|_, open| open != id);
    }

    pub fn entry(&self, id: &AuthoredId) -> Option<&SelectionEntry> {
        self.entries.get(id)
    }

    pub fn is_mounted(&self, id: &AuthoredId) -> bool {
        self.entries.contains_key(id)
    }

    /// Focus one directive, clearing focus everywhere else
    pub fn focus(&mut self, id: &AuthoredId) {
        for (entry_id, entry) in self.entries.iter_mut() {
            entry.focused = entry_id == id;
        }
    }

    pub fn blur(&mut self) {
        for entry in self.entries.values_mut() {
            entry.focused = false;
        }
    }

    pub fn focused(&self) -> Option<&AuthoredId> {
        self.entries
            .iter()
            .find_map(|(id, entry)| entry.focused.then_some(id))
    }

    /// Open a label's popover; any sibling label on the same anchor closes
    pub fn open_label(&mut self, anchor_id: &str, id: &AuthoredId) {
        if let Some(previous) = self.open_by_anchor.insert(anchor_id.to_string(), id.clone()) {
            if let Some(entry) = self.entries.get_mut(&previous) {
                entry.open = false;
            }
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.open = true;
        }
    }

    /// Close whatever label is open on this anchor
    pub fn close_label(&mut self, anchor_id: &str) {
        if let Some(previous) = self.open_by_anchor.remove(anchor_id) {
            if let Some(entry) = self.entries.get_mut(&previous) {
                entry.open = false;
            }
        }
    }

    pub fn open_on_anchor(&self, anchor_id: &str) -> Option<&AuthoredId> {
        self.open_by_anchor.get(anchor_id)
    }

    /// Record externally observed timeline order for a directive
    pub fn set_observed_order(&mut self, id: &AuthoredId, order: u32) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.observed_order = Some(order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> AuthoredId {
        AuthoredId::from(s)
    }

    #[test]
    fn test_mount_unmount_lifecycle() {
        let mut tracker = SelectionTracker::new();
        tracker.mount(id("a1"));
        assert!(tracker.is_mounted(&id("a1")));

        tracker.unmount(&id("a1"));
        assert!(!tracker.is_mounted(&id("a1")));
        assert!(tracker.entry(&id("a1")).is_none());
    }

    #[test]
    fn test_focus_is_exclusive() {
        let mut tracker = SelectionTracker::new();
        tracker.mount(id("a1"));
        tracker.mount(id("a2"));

        tracker.focus(&id("a1"));
        assert_eq!(tracker.focused(), Some(&id("a1")));

        tracker.focus(&id("a2"));
        assert_eq!(tracker.focused(), Some(&id("a2")));
        assert!(!tracker.entry(&id("a1")).unwrap().focused);

        tracker.blur();
        assert_eq!(tracker.focused(), None);
    }

    #[test]
    fn test_one_open_label_per_anchor() {
        let mut tracker = SelectionTracker::new();
        tracker.mount(id("l1"));
        tracker.mount(id("l2"));

        tracker.open_label("image-7", &id("l1"));
        assert!(tracker.entry(&id("l1")).unwrap().open);

        // opening the second closes the first on the same anchor
        tracker.open_label("image-7", &id("l2"));
        assert!(!tracker.entry(&id("l1")).unwrap().open);
        assert!(tracker.entry(&id("l2")).unwrap().open);
        assert_eq!(tracker.open_on_anchor("image-7"), Some(&id("l2")));

        tracker.close_label("image-7");
        assert!(!tracker.entry(&id("l2")).unwrap().open);
        assert_eq!(tracker.open_on_anchor("image-7"), None);
    }

    #[test]
    fn test_labels_on_different_anchors_are_independent() {
        let mut tracker = SelectionTracker::new();
        tracker.mount(id("l1"));
        tracker.mount(id("l2"));

        tracker.open_label("image-a", &id("l1"));
        tracker.open_label("image-b", &id("l2"));
        assert!(tracker.entry(&id("l1")).unwrap().open);
        assert!(tracker.entry(&id("l2")).unwrap().open);
    }

    #[test]
    fn test_observed_order_is_external() {
        let mut tracker = SelectionTracker::new();
        tracker.mount(id("a1"));

        // order comes from the timeline layer, not document position
        tracker.set_observed_order(&id("a1"), 3);
        assert_eq!(tracker.entry(&id("a1")).unwrap().observed_order, Some(3));

        // unknown ids are ignored, not created
        tracker.set_observed_order(&id("ghost"), 1);
        assert!(tracker.entry(&id("ghost")).is_none());
    }

    #[test]
    fn test_unmount_clears_anchor_slot() {
        let mut tracker = SelectionTracker::new();
        tracker.mount(id("l1"));
        tracker.open_label("image-7", &id("l1"));

        tracker.unmount(&id("l1"));
        assert_eq!(tracker.open_on_anchor("image-7"), None);
    }
}
