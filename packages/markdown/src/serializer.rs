//! Deterministic serializer from the abstract tree back to markdown.
//!
//! The output is canonical: `-` bullet markers, one blank line between
//! blocks, directive fences sized `3 + nested container depth`, and `\`,
//! `<`, `:` escaped inside phrasing content so text can never be re-read as
//! a directive or an embedded markup element. Serializing, parsing, and
//! serializing again reproduces the same bytes.

use crate::ast::{Alignment, Attributes, Node};
use std::fmt::Write;

/// Serialize any node to markdown text
pub fn to_markdown(node: &Node) -> String {
    Serializer::new().serialize(node)
}

pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&mut self, node: &Node) -> String {
        let mut out = String::new();
        match node {
            Node::Root { children, .. } => {
                self.serialize_blocks(children, &mut out);
                out.push('\n');
            }
            _ => self.serialize_block(node, &mut out),
        }
        out
    }

    fn serialize_blocks(&mut self, blocks: &[Node], out: &mut String) {
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            self.serialize_block(block, out);
        }
    }

    fn serialize_block(&mut self, node: &Node, out: &mut String) {
        match node {
            Node::Root { children, .. } => self.serialize_blocks(children, out),

            Node::Yaml { value, .. } => {
                out.push_str("---\n");
                out.push_str(value);
                out.push_str("\n---");
            }

            Node::Paragraph { children, .. } => {
                self.serialize_phrasing(children, out);
            }

            Node::Heading {
                depth, children, ..
            } => {
                for _ in 0..*depth {
                    out.push('#');
                }
                out.push(' ');
                self.serialize_phrasing(children, out);
            }

            Node::Code { lang, value, .. } => {
                out.push_str("```");
                if let Some(lang) = lang {
                    out.push_str(lang);
                }
                out.push('\n');
                out.push_str(value);
                out.push_str("\n```");
            }

            Node::List {
                ordered, children, ..
            } => {
                for (i, item) in children.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    if *ordered {
                        let _ = write!(out, "{}. ", i + 1);
                    } else {
                        out.push_str("- ");
                    }
                    if let Node::ListItem {
                        checked, children, ..
                    } = item
                    {
                        match checked {
                            Some(true) => out.push_str("[x] "),
                            Some(false) => out.push_str("[ ] "),
                            None => {}
                        }
                        self.serialize_item_content(children, out);
                    }
                }
            }

            Node::Table {
                align, children, ..
            } => {
                let mut rows = children.iter();
                if let Some(header) = rows.next() {
                    self.serialize_table_row(header, out);
                    out.push('\n');
                    out.push('|');
                    for a in align {
                        let marker = match a {
                            Alignment::None => " --- ",
                            Alignment::Left => " :-- ",
                            Alignment::Right => " --: ",
                            Alignment::Center => " :-: ",
                        };
                        out.push_str(marker);
                        out.push('|');
                    }
                }
                for row in rows {
                    out.push('\n');
                    self.serialize_table_row(row, out);
                }
            }

            Node::ThematicBreak { .. } => out.push_str("---"),

            Node::Html { value, .. } => out.push_str(value),

            Node::ContainerDirective {
                name,
                attributes,
                children,
                ..
            } => {
                let fence = ":".repeat(3 + nested_container_depth(children));
                out.push_str(&fence);
                out.push_str(name);
                serialize_attributes(attributes, out);
                out.push('\n');
                if !children.is_empty() {
                    self.serialize_blocks(children, out);
                    out.push('\n');
                }
                out.push_str(&fence);
            }

            Node::LeafDirective {
                name,
                attributes,
                children,
                ..
            } => {
                out.push_str("::");
                out.push_str(name);
                if !children.is_empty() {
                    out.push('[');
                    self.serialize_phrasing(children, out);
                    out.push(']');
                }
                serialize_attributes(attributes, out);
            }

            // Phrasing content at block position serializes inline
            _ => self.serialize_inline(node, out),
        }
    }

    /// List items hold a single paragraph of phrasing content
    fn serialize_item_content(&mut self, children: &[Node], out: &mut String) {
        match children.first() {
            Some(Node::Paragraph { children, .. }) => self.serialize_phrasing(children, out),
            _ => self.serialize_phrasing(children, out),
        }
    }

    fn serialize_table_row(&mut self, row: &Node, out: &mut String) {
        let Node::TableRow { children, .. } = row else {
            return;
        };
        out.push('|');
        for cell in children {
            out.push(' ');
            if let Node::TableCell { children, .. } = cell {
                self.serialize_phrasing(children, out);
            }
            out.push_str(" |");
        }
    }

    fn serialize_phrasing(&mut self, children: &[Node], out: &mut String) {
        for child in children {
            self.serialize_inline(child, out);
        }
    }

    fn serialize_inline(&mut self, node: &Node, out: &mut String) {
        match node {
            Node::Text { value, .. } => escape_text(value, out),

            Node::Emphasis { children, .. } => {
                out.push('*');
                self.serialize_phrasing(children, out);
                out.push('*');
            }

            Node::Strong { children, .. } => {
                out.push_str("**");
                self.serialize_phrasing(children, out);
                out.push_str("**");
            }

            Node::Delete { children, .. } => {
                out.push_str("~~");
                self.serialize_phrasing(children, out);
                out.push_str("~~");
            }

            Node::InlineCode { value, .. } => {
                out.push('`');
                out.push_str(value);
                out.push('`');
            }

            Node::Html { value, .. } => out.push_str(value),

            Node::TextDirective {
                name,
                attributes,
                children,
                ..
            } => {
                out.push(':');
                out.push_str(name);
                out.push('[');
                self.serialize_phrasing(children, out);
                out.push(']');
                serialize_attributes(attributes, out);
            }

            // Block content in phrasing position: serialize its children
            other => {
                if let Some(children) = other.children() {
                    self.serialize_phrasing(children, out);
                }
            }
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// `{key="value" flag}`, omitted entirely when empty.
///
/// Values are always double-quoted; boolean-like flags are bare keys.
fn serialize_attributes(attrs: &Attributes, out: &mut String) {
    if attrs.is_empty() {
        return;
    }
    out.push('{');
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match value {
            Some(value) => {
                let _ = write!(out, "{}=\"{}\"", key, value);
            }
            None => out.push_str(key),
        }
    }
    out.push('}');
}

/// Escape characters that would re-parse as syntax inside phrasing content.
///
/// Only `<` (embedded markup), `:` (directive marker) and the escape
/// character itself need protection in this dialect.
fn escape_text(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("\\<"),
            ':' => out.push_str("\\:"),
            _ => out.push(c),
        }
    }
}

/// How deep container directives nest below these nodes.
///
/// Determines fence length: a container holding another container needs a
/// longer fence than its child.
fn nested_container_depth(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::ContainerDirective { children, .. } => 1 + nested_container_depth(children),
            other => other
                .children()
                .map(nested_container_depth)
                .unwrap_or(0),
        })
        .max()
        .unwrap_or(0)
}
