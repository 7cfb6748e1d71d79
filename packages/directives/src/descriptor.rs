//! # Directive Descriptor Registry
//!
//! A declarative mapping from directive name to its shape: which attribute
//! keys an editor may interpret, whether the node carries children, and the
//! directive kind. The registry performs no validation beyond name matching;
//! exactly one descriptor must match any given node name.

use chalkmark_markdown::Node;

/// Directive kind: what the node may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Block children between opening and closing fences
    Container,
    /// Inline span wrapping phrasing content (`:name[...]`)
    LeafText,
    /// Standalone line with optional phrasing label (`::name[...]`)
    LeafFlow,
}

/// Shape declaration for one directive family member.
///
/// `attributes` lists the keys an editor may interpret. It is not a filter:
/// undeclared keys on a parsed node are preserved verbatim through
/// round-trips, editors just never read them.
#[derive(Debug, Clone)]
pub struct DirectiveDescriptor {
    pub name: &'static str,
    pub kind: DirectiveKind,
    pub attributes: &'static [&'static str],
    pub has_children: bool,
}

impl DirectiveDescriptor {
    /// Whether this descriptor governs the given node
    pub fn test(&self, node: &Node) -> bool {
        node.directive_name() == Some(self.name)
    }

    /// Whether an attribute key is one this descriptor's editor interprets
    pub fn declares(&self, key: &str) -> bool {
        self.attributes.contains(&key)
    }
}

/// Registry of all known directive descriptors
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    descriptors: Vec<DirectiveDescriptor>,
}

impl DescriptorRegistry {
    /// Registry with all built-in directive families
    pub fn new() -> Self {
        Self {
            descriptors: vec![
                DirectiveDescriptor {
                    name: "tabs",
                    kind: DirectiveKind::Container,
                    attributes: &["color", "style"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "tabContent",
                    kind: DirectiveKind::Container,
                    attributes: &["title"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "steps",
                    kind: DirectiveKind::Container,
                    attributes: &["title", "style"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "stepContent",
                    kind: DirectiveKind::Container,
                    attributes: &["title"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "accordion",
                    kind: DirectiveKind::Container,
                    attributes: &["style"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "accordionContent",
                    kind: DirectiveKind::Container,
                    attributes: &["title"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "gridContainer",
                    kind: DirectiveKind::Container,
                    attributes: &["style"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "grid",
                    kind: DirectiveKind::Container,
                    attributes: &["textAlign"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "imageLabel",
                    kind: DirectiveKind::Container,
                    attributes: &["id", "title", "x", "y"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "imageText",
                    kind: DirectiveKind::Container,
                    attributes: &["id", "x", "y", "style"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "fx",
                    kind: DirectiveKind::LeafText,
                    attributes: &["type", "color"],
                    has_children: true,
                },
                DirectiveDescriptor {
                    name: "anim",
                    kind: DirectiveKind::Container,
                    attributes: &["id"],
                    has_children: true,
                },
            ],
        }
    }

    /// Registry without built-ins
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Register an additional descriptor
    pub fn register(&mut self, descriptor: DirectiveDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Descriptor for a directive name
    pub fn find(&self, name: &str) -> Option<&DirectiveDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// The single descriptor matching a node, if the node is a directive
    pub fn match_node(&self, node: &Node) -> Option<&DirectiveDescriptor> {
        self.descriptors.iter().find(|d| d.test(node))
    }

    pub fn descriptors(&self) -> &[DirectiveDescriptor] {
        &self.descriptors
    }
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
