//! # Editable Tree
//!
//! Reference implementation of the host editor contract: an ordered list of
//! top-level editable nodes, each wrapping one abstract-tree block behind an
//! ephemeral [`NodeKey`].
//!
//! The tree reproduces the observable constraints of the production host:
//!
//! - container-directive nodes expose **no child insertion/removal API**;
//!   the only structural edit is inserting parsed markdown at the caret and
//!   removing whole nodes, which is why structural editors replace entire
//!   subtrees on commit
//! - keys are minted fresh for every inserted node, so identity never
//!   survives a replace cycle (author-assigned `id` attributes do)
//! - every mutation bumps a revision and pushes the new markdown to
//!   subscribed listeners

use chalkmark_common::{KeyGenerator, NodeKey};
use chalkmark_directives::{DescriptorRegistry, DirectiveDescriptor};
use chalkmark_markdown::{from_markdown, to_markdown, Diagnostic, Node};

use crate::errors::EditorError;

/// One live top-level node: an abstract block plus its ephemeral key
#[derive(Debug, Clone)]
pub struct EditableNode {
    key: NodeKey,
    node: Node,
}

impl EditableNode {
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn directive_name(&self) -> Option<&str> {
        self.node.directive_name()
    }
}

/// Focus state restored by caret recovery
#[derive(Debug, Clone, PartialEq)]
pub struct Focus {
    pub key: NodeKey,
    /// Caret parked at the end of the node's first child
    pub at_end_of_first_child: bool,
}

type MarkdownListener = Box<dyn FnMut(&str)>;

/// The live document tree
pub struct EditableTree {
    blocks: Vec<EditableNode>,
    /// Insertion index for the next `insert_markdown`
    caret: usize,
    focus: Option<Focus>,
    keys: KeyGenerator,
    revision: u64,
    descriptors: DescriptorRegistry,
    diagnostics: Vec<Diagnostic>,
    listeners: Vec<MarkdownListener>,
}

impl std::fmt::Debug for EditableTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableTree")
            .field("blocks", &self.blocks.len())
            .field("caret", &self.caret)
            .field("revision", &self.revision)
            .field("listeners", &format!("{} listeners", self.listeners.len()))
            .finish()
    }
}

impl EditableTree {
    /// Build a tree by parsing markdown, with the built-in directive
    /// descriptors. `path` seeds key generation.
    pub fn from_markdown_source(path: &str, source: &str) -> Self {
        Self::with_descriptors(path, source, DescriptorRegistry::new())
    }

    /// Build a tree with a custom descriptor registry
    pub fn with_descriptors(path: &str, source: &str, descriptors: DescriptorRegistry) -> Self {
        let parsed = from_markdown(source);
        let mut keys = KeyGenerator::new(path);

        let blocks = match parsed.root {
            Node::Root { children, .. } => children
                .into_iter()
                .map(|node| EditableNode {
                    key: keys.next_key(),
                    node,
                })
                .collect(),
            other => vec![EditableNode {
                key: keys.next_key(),
                node: other,
            }],
        };

        let caret = blocks.len();
        Self {
            blocks,
            caret,
            focus: None,
            keys,
            revision: 0,
            descriptors,
            diagnostics: parsed.diagnostics,
            listeners: Vec::new(),
        }
    }

    /// The descriptor registry governing directive rendering and editing
    pub fn descriptors(&self) -> &DescriptorRegistry {
        &self.descriptors
    }

    /// Descriptor governing a live node, if it is a known directive
    pub fn descriptor_for(&self, key: &NodeKey) -> Option<&DirectiveDescriptor> {
        self.descriptors.match_node(self.get(key)?.node())
    }

    // -- reads --

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[EditableNode] {
        &self.blocks
    }

    pub fn get(&self, key: &NodeKey) -> Option<&EditableNode> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
        self.blocks.iter().position(|b| &b.key == key)
    }

    /// First top-level directive with this name
    pub fn first_directive(&self, name: &str) -> Option<&EditableNode> {
        self.blocks
            .iter()
            .find(|b| b.directive_name() == Some(name))
    }

    /// Serialize the whole document
    pub fn markdown(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            out.push_str(&to_markdown(&block.node));
        }
        out.push('\n');
        out
    }

    /// Bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    /// Parse diagnostics accumulated over the tree's lifetime
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // -- selection --

    /// Move the caret immediately after `key`; when `key` is the last
    /// sibling this is the end of the document.
    pub fn select_after(&mut self, key: &NodeKey) -> Result<(), EditorError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;
        self.caret = index + 1;
        Ok(())
    }

    /// Move the caret immediately before `key`
    pub fn select_before(&mut self, key: &NodeKey) -> Result<(), EditorError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;
        self.caret = index;
        Ok(())
    }

    /// Caret to end of document
    pub fn select_end(&mut self) {
        self.caret = self.blocks.len();
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Focus a node and park the caret at the end of its first child.
    /// Returns false when the key does not exist (yet).
    pub fn select_node_end(&mut self, key: &NodeKey) -> bool {
        if self.get(key).is_none() {
            return false;
        }
        self.focus = Some(Focus {
            key: key.clone(),
            at_end_of_first_child: true,
        });
        true
    }

    // -- mutation (the full host-editor write surface) --

    /// Parse markdown and splice the resulting blocks at the caret.
    ///
    /// Every inserted node gets a fresh key; returns them in document order.
    /// This is the only way to create structure, which is what forces the
    /// replace-the-whole-subtree commit pattern.
    pub fn insert_markdown(&mut self, markdown: &str) -> Result<Vec<NodeKey>, EditorError> {
        let parsed = from_markdown(markdown);
        for d in &parsed.diagnostics {
            tracing::warn!(message = %d.message, "diagnostic during insert");
        }
        self.diagnostics.extend(parsed.diagnostics);

        let children = match parsed.root {
            Node::Root { children, .. } => children,
            other => vec![other],
        };

        let mut inserted = Vec::with_capacity(children.len());
        for (i, node) in children.into_iter().enumerate() {
            let key = self.keys.next_key();
            inserted.push(key.clone());
            self.blocks.insert(self.caret + i, EditableNode { key, node });
        }
        self.caret += inserted.len();

        self.touch();
        Ok(inserted)
    }

    /// Remove a node from the tree
    pub fn remove_node(&mut self, key: &NodeKey) -> Result<(), EditorError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;
        self.blocks.remove(index);
        if index < self.caret {
            self.caret -= 1;
        }
        if self.focus.as_ref().map(|f| &f.key) == Some(key) {
            self.focus = None;
        }

        self.touch();
        Ok(())
    }

    /// Non-structural update transaction on one node (attribute or text
    /// edits). Structural edits of container children are deliberately not
    /// expressible here.
    pub fn update_block<F>(&mut self, key: &NodeKey, update: F) -> Result<(), EditorError>
    where
        F: FnOnce(&mut Node),
    {
        let index = self
            .index_of(key)
            .ok_or_else(|| EditorError::NodeNotFound(key.clone()))?;
        update(&mut self.blocks[index].node);

        self.touch();
        Ok(())
    }

    // -- change notification --

    /// Subscribe to "document markdown changed". Listeners run synchronously
    /// after every mutation, on the single writer thread.
    pub fn subscribe_markdown<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn touch(&mut self) {
        self.revision += 1;
        if self.listeners.is_empty() {
            return;
        }
        let markdown = self.markdown();
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(&markdown);
        }
        self.listeners = listeners;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SOURCE: &str = ":::tabs\n:::tabContent{title=\"A\"}\nHello\n:::\n:::\n\nA paragraph";

    #[test]
    fn test_parse_assigns_keys_to_top_level_blocks() {
        let tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.blocks()[0].directive_name(), Some("tabs"));
        assert_ne!(tree.blocks()[0].key(), tree.blocks()[1].key());
    }

    #[test]
    fn test_insert_at_caret_and_fresh_keys() {
        let mut tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let tabs_key = tree.blocks()[0].key().clone();

        tree.select_after(&tabs_key).unwrap();
        let inserted = tree.insert_markdown("New block").unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.index_of(&inserted[0]), Some(1));

        // a second insert of the same text gets a different key
        let again = tree.insert_markdown("New block").unwrap();
        assert_ne!(inserted[0], again[0]);
    }

    #[test]
    fn test_remove_node() {
        let mut tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let key = tree.blocks()[1].key().clone();
        tree.remove_node(&key).unwrap();
        assert_eq!(tree.len(), 1);

        let missing = tree.remove_node(&key);
        assert!(matches!(missing, Err(EditorError::NodeNotFound(_))));
    }

    #[test]
    fn test_no_child_mutation_surface_for_containers() {
        // The write surface is exactly: insert_markdown, remove_node, and
        // non-structural update_block. Replacing a container's children
        // requires serializing a new subtree.
        let mut tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let key = tree.blocks()[0].key().clone();

        // attribute edits are allowed
        tree.update_block(&key, |node| {
            if let Some(attrs) = node.attributes_mut() {
                attrs.set("color", "transparent");
            }
        })
        .unwrap();
        assert!(tree.markdown().contains("color=\"transparent\""));
    }

    #[test]
    fn test_revision_and_listeners_fire_on_mutation() {
        let mut tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tree.subscribe_markdown(move |md| sink.borrow_mut().push(md.to_string()));

        let before = tree.revision();
        tree.select_end();
        tree.insert_markdown("Tail").unwrap();

        assert_eq!(tree.revision(), before + 1);
        let notifications = seen.borrow();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].contains("Tail"));
    }

    #[test]
    fn test_caret_adjusts_when_earlier_node_removed() {
        let mut tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let first = tree.blocks()[0].key().clone();
        tree.select_end();
        let caret_before = tree.caret();

        tree.remove_node(&first).unwrap();
        assert_eq!(tree.caret(), caret_before - 1);
    }

    #[test]
    fn test_descriptor_lookup_for_live_nodes() {
        let tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let tabs_key = tree.blocks()[0].key().clone();
        let paragraph_key = tree.blocks()[1].key().clone();

        let descriptor = tree.descriptor_for(&tabs_key).unwrap();
        assert_eq!(descriptor.name, "tabs");
        assert!(descriptor.has_children);

        // non-directive blocks have no descriptor
        assert!(tree.descriptor_for(&paragraph_key).is_none());
    }

    #[test]
    fn test_select_node_end_requires_existing_key() {
        let mut tree = EditableTree::from_markdown_source("/lesson.md", SOURCE);
        let key = tree.blocks()[0].key().clone();
        assert!(tree.select_node_end(&key));
        assert_eq!(tree.focus().map(|f| &f.key), Some(&key));

        tree.remove_node(&key).unwrap();
        assert!(tree.focus().is_none());
        assert!(!tree.select_node_end(&key));
    }
}
