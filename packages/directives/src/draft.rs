//! Draft child-list editing.
//!
//! Configuration modals operate on a cloned copy of a container's children.
//! Every operation here mutates only the draft; the live document is
//! untouched until the draft is committed through a container session.
//! Operations are totally ordered by call order.

use crate::families::StructuralFamily;
use chalkmark_markdown::Node;

/// Editable copy of a structural container's child list
#[derive(Debug, Clone)]
pub struct ChildDraft {
    family: StructuralFamily,
    children: Vec<Node>,
}

impl ChildDraft {
    /// Start a draft from the container's current children
    pub fn new(family: StructuralFamily, children: Vec<Node>) -> Self {
        Self { family, children }
    }

    pub fn family(&self) -> StructuralFamily {
        self.family
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn items(&self) -> &[Node] {
        &self.children
    }

    /// Add a default item to the end
    pub fn append(&mut self) {
        self.children.push(self.family.default_item());
    }

    /// Insert a default item before `index`
    pub fn insert_before(&mut self, index: usize) {
        let index = index.min(self.children.len());
        self.children.insert(index, self.family.default_item());
    }

    /// Insert a default item after `index`; past the last item this appends
    pub fn insert_after(&mut self, index: usize) {
        if index + 1 >= self.children.len() {
            self.children.push(self.family.default_item());
        } else {
            self.children.insert(index + 1, self.family.default_item());
        }
    }

    /// Remove the item at `index`. Removing the last remaining item is
    /// allowed; a family that wants a floor enforces it in UI.
    pub fn remove(&mut self, index: usize) {
        if index < self.children.len() {
            self.children.remove(index);
        }
    }

    /// Update the item's label attribute (e.g. tab title)
    pub fn update_label(&mut self, index: usize, label: &str) {
        let attribute = self.family.label_attribute;
        if let Some(attrs) = self
            .children
            .get_mut(index)
            .and_then(|item| item.attributes_mut())
        {
            attrs.set(attribute, label);
        }
    }

    /// Labels in draft order
    pub fn labels(&self) -> Vec<Option<&str>> {
        self.children
            .iter()
            .map(|item| self.family.label_of(item))
            .collect()
    }

    /// Consume the draft, yielding the final child list
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::TABS;

    fn draft_of(n: usize) -> ChildDraft {
        let children = (0..n)
            .map(|i| {
                let mut item = TABS.default_item();
                item.attributes_mut().unwrap().set("title", format!("T{}", i));
                item
            })
            .collect();
        ChildDraft::new(TABS, children)
    }

    fn titles(draft: &ChildDraft) -> Vec<String> {
        draft
            .labels()
            .into_iter()
            .map(|l| l.unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_length_tracks_inserts_and_removes() {
        // resulting length == n + inserts - removes, for any op sequence
        let mut draft = draft_of(3);
        draft.append();
        draft.insert_before(0);
        draft.insert_after(1);
        draft.remove(4);
        assert_eq!(draft.len(), 3 + 3 - 1);
    }

    #[test]
    fn test_order_matches_operations_applied() {
        let mut draft = draft_of(2); // T0 T1
        draft.insert_before(1); // T0 New T1
        draft.update_label(1, "Mid");
        draft.insert_after(2); // T0 Mid T1 New
        draft.update_label(3, "End");

        assert_eq!(titles(&draft), vec!["T0", "Mid", "T1", "End"]);
    }

    #[test]
    fn test_insert_after_last_appends() {
        let mut draft = draft_of(2);
        draft.insert_after(1);
        assert_eq!(draft.len(), 3);
        assert_eq!(TABS.label_of(&draft.items()[2]), Some("New Tab"));

        // well past the end also appends rather than panicking
        draft.insert_after(99);
        assert_eq!(draft.len(), 4);
    }

    #[test]
    fn test_removing_last_item_leaves_empty_draft() {
        let mut draft = draft_of(1);
        draft.remove(0);
        assert!(draft.is_empty());

        // no-op on an empty draft
        draft.remove(0);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_operations_do_not_touch_source_children() {
        let original = vec![TABS.default_item()];
        let mut draft = ChildDraft::new(TABS, original.clone());
        draft.remove(0);
        draft.append();
        draft.update_label(0, "changed");

        // the caller's list is unaffected: the draft owns a copy
        assert_eq!(TABS.label_of(&original[0]), Some("New Tab"));
    }
}
