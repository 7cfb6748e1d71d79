use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span for nodes constructed in memory rather than parsed
    pub fn synthetic() -> Self {
        Self::default()
    }
}

/// Directive attributes, insertion-ordered.
///
/// Order is part of the wire format: serialization must be deterministic and
/// reproduce author order, so this is a list rather than a map. A key with no
/// value is a boolean-like flag (presence/absence, never a literal boolean).
/// Unknown keys are preserved verbatim; descriptors gate only which keys an
/// editor interprets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, Option<String>)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key` if it is present with a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether `key` is present at all (flag or valued)
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Convenience for valued attributes
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, Some(value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Column alignment for table cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

/// Abstract document tree node.
///
/// The shape follows mdast: typed nodes, attributes on directives, ordered
/// children on everything that can contain content. Block-level directives
/// come in container form (`:::name ... :::`); inline effects are text
/// directives (`:name[...]{...}`); `::name[...]` is the leaf form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root {
        children: Vec<Node>,
        span: Span,
    },

    /// YAML frontmatter block (`--- ... ---` at document start)
    Yaml {
        value: String,
        span: Span,
    },

    Paragraph {
        children: Vec<Node>,
        span: Span,
    },

    Heading {
        depth: u8,
        children: Vec<Node>,
        span: Span,
    },

    Text {
        value: String,
        span: Span,
    },

    Emphasis {
        children: Vec<Node>,
        span: Span,
    },

    Strong {
        children: Vec<Node>,
        span: Span,
    },

    /// Strikethrough (GFM extension)
    Delete {
        children: Vec<Node>,
        span: Span,
    },

    InlineCode {
        value: String,
        span: Span,
    },

    Code {
        lang: Option<String>,
        value: String,
        span: Span,
    },

    List {
        ordered: bool,
        children: Vec<Node>,
        span: Span,
    },

    /// `checked` is Some for task-list items (GFM extension)
    ListItem {
        checked: Option<bool>,
        children: Vec<Node>,
        span: Span,
    },

    Table {
        align: Vec<Alignment>,
        children: Vec<Node>,
        span: Span,
    },

    TableRow {
        children: Vec<Node>,
        span: Span,
    },

    TableCell {
        children: Vec<Node>,
        span: Span,
    },

    ThematicBreak {
        span: Span,
    },

    /// Embedded markup element, kept verbatim
    Html {
        value: String,
        span: Span,
    },

    /// `:::name{...}` with block children
    ContainerDirective {
        name: String,
        attributes: Attributes,
        children: Vec<Node>,
        span: Span,
    },

    /// `::name[...]{...}` on its own line, phrasing children
    LeafDirective {
        name: String,
        attributes: Attributes,
        children: Vec<Node>,
        span: Span,
    },

    /// `:name[...]{...}` inside phrasing content
    TextDirective {
        name: String,
        attributes: Attributes,
        children: Vec<Node>,
        span: Span,
    },
}

impl Node {
    pub fn span(&self) -> &Span {
        match self {
            Node::Root { span, .. }
            | Node::Yaml { span, .. }
            | Node::Paragraph { span, .. }
            | Node::Heading { span, .. }
            | Node::Text { span, .. }
            | Node::Emphasis { span, .. }
            | Node::Strong { span, .. }
            | Node::Delete { span, .. }
            | Node::InlineCode { span, .. }
            | Node::Code { span, .. }
            | Node::List { span, .. }
            | Node::ListItem { span, .. }
            | Node::Table { span, .. }
            | Node::TableRow { span, .. }
            | Node::TableCell { span, .. }
            | Node::ThematicBreak { span }
            | Node::Html { span, .. }
            | Node::ContainerDirective { span, .. }
            | Node::LeafDirective { span, .. }
            | Node::TextDirective { span, .. } => span,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root { children, .. }
            | Node::Paragraph { children, .. }
            | Node::Heading { children, .. }
            | Node::Emphasis { children, .. }
            | Node::Strong { children, .. }
            | Node::Delete { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children, .. }
            | Node::TableRow { children, .. }
            | Node::TableCell { children, .. }
            | Node::ContainerDirective { children, .. }
            | Node::LeafDirective { children, .. }
            | Node::TextDirective { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children, .. }
            | Node::Paragraph { children, .. }
            | Node::Heading { children, .. }
            | Node::Emphasis { children, .. }
            | Node::Strong { children, .. }
            | Node::Delete { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children, .. }
            | Node::TableRow { children, .. }
            | Node::TableCell { children, .. }
            | Node::ContainerDirective { children, .. }
            | Node::LeafDirective { children, .. }
            | Node::TextDirective { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Directive name, if this node is any directive form
    pub fn directive_name(&self) -> Option<&str> {
        match self {
            Node::ContainerDirective { name, .. }
            | Node::LeafDirective { name, .. }
            | Node::TextDirective { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::ContainerDirective { attributes, .. }
            | Node::LeafDirective { attributes, .. }
            | Node::TextDirective { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            Node::ContainerDirective { attributes, .. }
            | Node::LeafDirective { attributes, .. }
            | Node::TextDirective { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn is_directive(&self) -> bool {
        self.directive_name().is_some()
    }

    // -- constructors for nodes built in memory --

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
            span: Span::synthetic(),
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph {
            children,
            span: Span::synthetic(),
        }
    }

    pub fn thematic_break() -> Self {
        Node::ThematicBreak {
            span: Span::synthetic(),
        }
    }

    pub fn container_directive(
        name: impl Into<String>,
        attributes: Attributes,
        children: Vec<Node>,
    ) -> Self {
        Node::ContainerDirective {
            name: name.into(),
            attributes,
            children,
            span: Span::synthetic(),
        }
    }

    pub fn text_directive(
        name: impl Into<String>,
        attributes: Attributes,
        children: Vec<Node>,
    ) -> Self {
        Node::TextDirective {
            name: name.into(),
            attributes,
            children,
            span: Span::synthetic(),
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root {
            children,
            span: Span::synthetic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_preserve_insertion_order() {
        let mut attrs = Attributes::new();
        attrs.set("title", "A");
        attrs.set("color", "blue");
        attrs.insert("disabled", None);

        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["title", "color", "disabled"]);

        // Replacing keeps position
        attrs.set("title", "B");
        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["title", "color", "disabled"]);
        assert_eq!(attrs.get("title"), Some("B"));
    }

    #[test]
    fn test_flag_attribute_has_no_value() {
        let mut attrs = Attributes::new();
        attrs.insert("disabled", None);

        assert!(attrs.contains_key("disabled"));
        assert_eq!(attrs.get("disabled"), None);
    }

    #[test]
    fn test_node_serde_tagging() {
        let node = Node::container_directive("tabs", Attributes::new(), vec![]);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"containerDirective\""));

        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back.directive_name(), Some("tabs"));
    }
}
