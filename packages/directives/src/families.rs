//! Structural family configuration.
//!
//! Tabs, steps, accordions and grids share one editing pattern: a container
//! directive holding an ordered list of content directives. Each family
//! declares its two directive names, the attribute used as a human-readable
//! label, and the default content for a newly inserted item. Container order
//! defines display/navigation order.

use chalkmark_markdown::{Attributes, Node};

/// Static configuration for one container/content directive family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralFamily {
    /// Container directive name (`tabs`, `steps`, ...)
    pub container: &'static str,
    /// Content-child directive name (`tabContent`, `stepContent`, ...)
    pub content: &'static str,
    /// Attribute holding the item label
    pub label_attribute: &'static str,
    /// Label given to newly inserted items
    pub default_label: &'static str,
}

pub const TABS: StructuralFamily = StructuralFamily {
    container: "tabs",
    content: "tabContent",
    label_attribute: "title",
    default_label: "New Tab",
};

pub const STEPS: StructuralFamily = StructuralFamily {
    container: "steps",
    content: "stepContent",
    label_attribute: "title",
    default_label: "New Step",
};

pub const ACCORDION: StructuralFamily = StructuralFamily {
    container: "accordion",
    content: "accordionContent",
    label_attribute: "title",
    default_label: "New Section",
};

pub const GRID: StructuralFamily = StructuralFamily {
    container: "gridContainer",
    content: "grid",
    label_attribute: "textAlign",
    default_label: "left",
};

pub const ALL_FAMILIES: [StructuralFamily; 4] = [TABS, STEPS, ACCORDION, GRID];

impl StructuralFamily {
    /// Family whose container directive has this name
    pub fn for_container(name: &str) -> Option<StructuralFamily> {
        ALL_FAMILIES.iter().copied().find(|f| f.container == name)
    }

    /// A fresh content item with the family default label and an empty body
    pub fn default_item(&self) -> Node {
        let mut attributes = Attributes::new();
        attributes.set(self.label_attribute, self.default_label);
        Node::container_directive(
            self.content,
            attributes,
            vec![Node::paragraph(vec![Node::text("")])],
        )
    }

    /// Whether a node is a content child of this family
    pub fn is_content(&self, node: &Node) -> bool {
        node.directive_name() == Some(self.content)
    }

    /// Label of a content item, when present
    pub fn label_of<'n>(&self, node: &'n Node) -> Option<&'n str> {
        node.attributes()?.get(self.label_attribute)
    }
}
