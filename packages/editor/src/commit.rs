//! # Container Editing Sessions
//!
//! A structural family's editor runs one session per container instance.
//! The session holds a draft copy of the child list while configuring; the
//! live document is untouched until commit.
//!
//! Commit replaces the whole subtree, because the host tree has no child
//! mutation surface for container directives:
//!
//! 1. move the caret immediately after the container (end of document when
//!    it is the last sibling), then yield so selection settles
//! 2. serialize a brand-new container (same name, same non-child
//!    attributes, draft children) and insert that markdown at the caret,
//!    then yield again
//! 3. confirm the fresh subtree is present
//! 4. remove the original node
//! 5. re-acquire the caret inside the new structure
//!
//! The original is removed only after the insert is confirmed: a failure at
//! any earlier step leaves the document with the original node intact.

use chalkmark_common::NodeKey;
use chalkmark_directives::{migrate_cells, ChildDraft, GridPreset, StructuralFamily};
use chalkmark_markdown::{to_markdown, Attributes, Node};

use crate::caret::place_caret_inside;
use crate::errors::EditorError;
use crate::scheduler::{VirtualClock, COMMIT_YIELD_MS};
use crate::tree::EditableTree;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Container renders its current children; no draft exists
    Viewing,
    /// A modal holds a draft of the child list
    Configuring,
}

/// Outcome of a successful commit
#[derive(Debug, Clone)]
pub struct ReplaceResult {
    /// Key of the freshly inserted container
    pub new_key: NodeKey,
    /// Key the original container had (now dead)
    pub removed_key: NodeKey,
    /// Tree revision after the replace
    pub revision: u64,
    /// Whether caret recovery landed inside the new structure
    pub caret_recovered: bool,
}

/// One editing session over one structural container instance
#[derive(Debug)]
pub struct ContainerSession {
    family: StructuralFamily,
    container_key: NodeKey,
    attributes: Attributes,
    state: SessionState,
    draft: Option<ChildDraft>,
    /// Which child the navigation control (tab strip, stepper, accordion
    /// list) shows; grids show all cells at once and ignore this
    active_child: usize,
}

impl ContainerSession {
    /// Open a session on a container node of a known structural family
    pub fn open(tree: &EditableTree, key: &NodeKey) -> Result<Self, EditorError> {
        let node = tree
            .get(key)
            .ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;

        let family = node
            .directive_name()
            .and_then(StructuralFamily::for_container)
            .ok_or_else(|| {
                EditorError::NotFamilyContainer(key.clone(), "structural".to_string())
            })?;

        let attributes = node.node().attributes().cloned().unwrap_or_default();

        Ok(Self {
            family,
            container_key: key.clone(),
            attributes,
            state: SessionState::Viewing,
            draft: None,
            active_child: 0,
        })
    }

    /// Make a child visually active in the navigation control
    pub fn select_child(&mut self, index: usize) {
        self.active_child = index;
    }

    pub fn active_child(&self) -> usize {
        self.active_child
    }

    pub fn family(&self) -> StructuralFamily {
        self.family
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn container_key(&self) -> &NodeKey {
        &self.container_key
    }

    /// Enter the configuring state with a draft copy of the current children
    pub fn configure(&mut self, tree: &EditableTree) -> Result<&mut ChildDraft, EditorError> {
        let node = tree
            .get(&self.container_key)
            .ok_or_else(|| EditorError::NodeNotFound(self.container_key.clone()))?;

        let children = node.node().children().unwrap_or_default().to_vec();
        self.draft = Some(ChildDraft::new(self.family, children));
        self.state = SessionState::Configuring;
        Ok(self.draft.as_mut().expect("draft just created"))
    }

    /// Draft under edit, while configuring
    pub fn draft_mut(&mut self) -> Option<&mut ChildDraft> {
        self.draft.as_mut()
    }

    /// Apply a grid preset to the draft, migrating cell content
    pub fn apply_preset(&mut self, preset: GridPreset) -> Result<(), EditorError> {
        let draft = self.draft.take().ok_or(EditorError::NotConfiguring)?;
        let family = self.family;
        let migrated = migrate_cells(draft.items(), preset);
        self.draft = Some(ChildDraft::new(family, migrated));
        Ok(())
    }

    /// Discard the draft; the live document was never touched
    pub fn cancel(&mut self) {
        self.draft = None;
        self.state = SessionState::Viewing;
    }

    /// Replace the live subtree with the draft.
    ///
    /// Not interruptible once started; errors before the removal step leave
    /// the original container in place, and a confirmation failure rolls the
    /// inserted blocks back out.
    pub fn commit(
        mut self,
        tree: &mut EditableTree,
        clock: &mut VirtualClock,
    ) -> Result<ReplaceResult, EditorError> {
        let draft = self.draft.take().ok_or(EditorError::NotConfiguring)?;
        self.state = SessionState::Viewing;

        tracing::debug!(family = self.family.container, "commit: select after original");
        tree.select_after(&self.container_key)?;
        // selection is not immediate in the host model
        clock.yield_for(COMMIT_YIELD_MS);

        let replacement = Node::container_directive(
            self.family.container,
            self.attributes.clone(),
            draft.into_children(),
        );
        let markdown = to_markdown(&replacement);

        tracing::debug!(family = self.family.container, "commit: insert replacement");
        let inserted = tree.insert_markdown(&markdown)?;
        clock.yield_for(COMMIT_YIELD_MS);

        // Confirm before removing the original: exactly one block, and it
        // must be this family's container
        if inserted.len() != 1 {
            for key in &inserted {
                let _ = tree.remove_node(key);
            }
            return Err(EditorError::UnexpectedInsertShape(inserted.len()));
        }
        let new_key = inserted.into_iter().next().expect("length checked");
        let confirmed = tree
            .get(&new_key)
            .map(|n| n.directive_name() == Some(self.family.container))
            .unwrap_or(false);
        if !confirmed {
            let _ = tree.remove_node(&new_key);
            return Err(EditorError::ConfirmationFailed);
        }

        tracing::debug!(family = self.family.container, "commit: remove original");
        tree.remove_node(&self.container_key)?;

        let caret_recovered = place_caret_inside(tree, &new_key, clock);

        Ok(ReplaceResult {
            new_key,
            removed_key: self.container_key,
            revision: tree.revision(),
            caret_recovered,
        })
    }
}
