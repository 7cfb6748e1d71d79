//! Forgiving markdown parser for the directive dialect.
//!
//! Produces an abstract tree from source text. Parsing never fails: malformed
//! constructs degrade to plain text or are dropped, and each degradation is
//! recorded as a [`Diagnostic`]. The supported extension set is fixed:
//! generic directives (container/leaf/text), embedded markup elements,
//! strikethrough, task-list items, and GFM tables.
//!
//! Directive fences are runs of three or more colons. A bare colon run closes
//! the innermost open container, so both the equal-length nesting emitted by
//! other authoring tools and the longer-outer form produced by
//! [`crate::serializer`] parse to the same tree.

use crate::ast::{Alignment, Attributes, Node, Span};
use crate::error::Diagnostic;
use crate::tokenizer::parse_attributes;

/// Result of a parse: a root node plus any recoverable problems
#[derive(Debug, Clone)]
pub struct Parsed {
    pub root: Node,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse markdown text into an abstract tree. Pure and infallible.
pub fn from_markdown(source: &str) -> Parsed {
    Parser::new(source).parse()
}

#[derive(Clone, Copy)]
struct Line<'src> {
    text: &'src str,
    offset: usize,
}

pub struct Parser<'src> {
    lines: Vec<Line<'src>>,
    pos: usize,
    source_len: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0;
        for raw in source.split('\n') {
            lines.push(Line {
                text: raw.trim_end_matches('\r'),
                offset,
            });
            offset += raw.len() + 1;
        }

        Self {
            lines,
            pos: 0,
            source_len: source.len(),
            diagnostics: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Parsed {
        let mut children = Vec::new();

        if let Some(yaml) = self.try_frontmatter() {
            children.push(yaml);
        }

        let (blocks, _closed) = self.parse_blocks(false);
        children.extend(blocks);

        Parsed {
            root: Node::Root {
                children,
                span: Span::new(0, self.source_len),
            },
            diagnostics: self.diagnostics,
        }
    }

    // -- line cursor --

    /// Current line, copied out so the cursor can advance while the line's
    /// text (which borrows the source, not the parser) stays usable.
    fn current(&self) -> Option<Line<'src>> {
        self.lines.get(self.pos).copied()
    }

    fn current_offset(&self) -> usize {
        self.current().map(|l| l.offset).unwrap_or(self.source_len)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    // -- frontmatter --

    /// YAML frontmatter is only recognized at the very start of the document
    /// and only when the closing delimiter exists.
    fn try_frontmatter(&mut self) -> Option<Node> {
        if self.pos != 0 || self.lines.first().map(|l| l.text) != Some("---") {
            return None;
        }

        let close = (1..self.lines.len()).find(|&i| self.lines[i].text == "---")?;

        let value = self.lines[1..close]
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n");
        let end = self.lines[close].offset + self.lines[close].text.len();
        self.pos = close + 1;

        Some(Node::Yaml {
            value,
            span: Span::new(0, end),
        })
    }

    // -- block parsing --

    /// Parse blocks until end of input or, when `in_directive`, a bare colon
    /// fence. Returns the blocks and whether a closing fence was consumed.
    fn parse_blocks(&mut self, in_directive: bool) -> (Vec<Node>, bool) {
        let mut blocks = Vec::new();

        while let Some(line) = self.current() {
            let trimmed = line.text.trim_end();
            let offset = line.offset;

            if trimmed.is_empty() {
                self.advance();
                continue;
            }

            if bare_fence(trimmed).is_some() {
                self.advance();
                if in_directive {
                    return (blocks, true);
                }
                self.diagnostics
                    .push(Diagnostic::new("unmatched directive closing fence", offset));
                continue;
            }

            if let Some((fence_len, name, frag)) = container_open(trimmed) {
                blocks.push(self.parse_container(fence_len, name, frag, offset));
                continue;
            }

            if let Some((name, body, frag)) = leaf_open(trimmed) {
                blocks.push(self.parse_leaf(name, body, frag, offset, trimmed.len()));
                continue;
            }

            if let Some(lang) = trimmed.strip_prefix("```") {
                blocks.push(self.parse_code(lang, offset));
                continue;
            }

            if let Some((depth, rest)) = heading_open(trimmed) {
                let children = self.parse_inline(rest, offset + depth as usize + 1);
                self.advance();
                blocks.push(Node::Heading {
                    depth,
                    children,
                    span: Span::new(offset, offset + trimmed.len()),
                });
                continue;
            }

            if is_thematic_break(trimmed) {
                self.advance();
                blocks.push(Node::ThematicBreak {
                    span: Span::new(offset, offset + trimmed.len()),
                });
                continue;
            }

            if trimmed.starts_with('|') && self.next_is_delimiter_row() {
                blocks.push(self.parse_table(offset));
                continue;
            }

            if list_item_open(trimmed).is_some() {
                blocks.push(self.parse_list(offset));
                continue;
            }

            if trimmed.starts_with('<') {
                blocks.push(self.parse_html_block(offset));
                continue;
            }

            blocks.push(self.parse_paragraph(offset));
        }

        (blocks, false)
    }

    fn parse_container(
        &mut self,
        _fence_len: usize,
        name: &str,
        frag: Option<(&str, usize)>,
        offset: usize,
    ) -> Node {
        let attributes = self.collect_attributes(frag, offset);
        self.advance();

        let (children, closed) = self.parse_blocks(true);
        if !closed {
            self.diagnostics.push(Diagnostic::new(
                format!("directive `{}` was never closed", name),
                offset,
            ));
        }

        Node::ContainerDirective {
            name: name.to_string(),
            attributes,
            children,
            span: Span::new(offset, self.current_offset()),
        }
    }

    fn parse_leaf(
        &mut self,
        name: &str,
        body: Option<&str>,
        frag: Option<(&str, usize)>,
        offset: usize,
        line_len: usize,
    ) -> Node {
        let attributes = self.collect_attributes(frag, offset);
        let children = body
            .map(|b| self.parse_inline(b, offset))
            .unwrap_or_default();
        self.advance();

        Node::LeafDirective {
            name: name.to_string(),
            attributes,
            children,
            span: Span::new(offset, offset + line_len),
        }
    }

    fn collect_attributes(&mut self, frag: Option<(&str, usize)>, line_offset: usize) -> Attributes {
        match frag {
            Some((inner, rel)) => {
                let (attrs, diags) = parse_attributes(inner, line_offset + rel);
                for d in &diags {
                    tracing::warn!(message = %d.message, offset = d.offset, "dropped attribute fragment");
                }
                self.diagnostics.extend(diags);
                attrs
            }
            None => Attributes::new(),
        }
    }

    fn parse_code(&mut self, lang: &str, offset: usize) -> Node {
        let lang = {
            let trimmed = lang.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        self.advance();

        let mut value_lines: Vec<&'src str> = Vec::new();
        loop {
            match self.current() {
                None => {
                    self.diagnostics
                        .push(Diagnostic::new("unterminated code fence", offset));
                    break;
                }
                Some(line) if line.text.trim_end() == "```" => {
                    self.advance();
                    break;
                }
                Some(line) => {
                    value_lines.push(line.text);
                    self.advance();
                }
            }
        }

        Node::Code {
            lang,
            value: value_lines.join("\n"),
            span: Span::new(offset, self.current_offset()),
        }
    }

    fn next_is_delimiter_row(&self) -> bool {
        self.lines
            .get(self.pos + 1)
            .map(|l| is_delimiter_row(l.text.trim_end()))
            .unwrap_or(false)
    }

    fn parse_table(&mut self, offset: usize) -> Node {
        let header = self.current().expect("table header line");
        self.advance();

        let delimiter = self.current().expect("table delimiter line");
        let align = split_row(delimiter.text.trim_end())
            .iter()
            .map(|cell| parse_alignment(cell))
            .collect::<Vec<_>>();
        self.advance();

        let mut rows = vec![self.make_table_row(header)];
        while let Some(line) = self.current() {
            if !line.text.trim_end().starts_with('|') {
                break;
            }
            self.advance();
            rows.push(self.make_table_row(line));
        }

        Node::Table {
            align,
            children: rows,
            span: Span::new(offset, self.current_offset()),
        }
    }

    fn make_table_row(&mut self, line: Line<'src>) -> Node {
        let trimmed = line.text.trim_end();
        let span = Span::new(line.offset, line.offset + trimmed.len());
        let cells = split_row(trimmed)
            .into_iter()
            .map(|cell| Node::TableCell {
                children: self.parse_inline(cell.trim(), line.offset),
                span: span.clone(),
            })
            .collect();

        Node::TableRow {
            children: cells,
            span,
        }
    }

    fn parse_list(&mut self, offset: usize) -> Node {
        let first = self.current().expect("list start line");
        let ordered = matches!(list_item_open(first.text.trim_end()), Some((true, _)));

        let mut items = Vec::new();
        while let Some(line) = self.current() {
            let trimmed = line.text.trim_end();
            match list_item_open(trimmed) {
                Some((is_ordered, rest)) if is_ordered == ordered => {
                    self.advance();
                    let (checked, content) = task_marker(rest);
                    let children = self.parse_inline(content, line.offset);
                    let span = Span::new(line.offset, line.offset + trimmed.len());
                    items.push(Node::ListItem {
                        checked,
                        children: vec![Node::Paragraph {
                            children,
                            span: span.clone(),
                        }],
                        span,
                    });
                }
                _ => break,
            }
        }

        Node::List {
            ordered,
            children: items,
            span: Span::new(offset, self.current_offset()),
        }
    }

    fn parse_html_block(&mut self, offset: usize) -> Node {
        let mut value_lines: Vec<&'src str> = Vec::new();
        while let Some(line) = self.current() {
            let trimmed = line.text.trim_end();
            if trimmed.is_empty() {
                break;
            }
            value_lines.push(trimmed);
            self.advance();
        }

        Node::Html {
            value: value_lines.join("\n"),
            span: Span::new(offset, self.current_offset()),
        }
    }

    fn parse_paragraph(&mut self, offset: usize) -> Node {
        let mut text_lines: Vec<&'src str> = Vec::new();
        while let Some(line) = self.current() {
            let trimmed = line.text.trim_end();
            if trimmed.is_empty() || (!text_lines.is_empty() && is_block_interrupt(trimmed)) {
                break;
            }
            text_lines.push(trimmed);
            self.advance();
        }

        let text = text_lines.join("\n");
        let children = self.parse_inline(&text, offset);

        Node::Paragraph {
            children,
            span: Span::new(offset, offset + text.len()),
        }
    }

    // -- inline parsing --

    /// Parse phrasing content: text runs, emphasis/strong/strikethrough,
    /// inline code, embedded markup, and text directives.
    fn parse_inline(&mut self, text: &str, base: usize) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut buf = String::new();
        let mut buf_start = 0;
        let bytes = text.as_bytes();
        let mut i = 0;

        macro_rules! flush {
            () => {
                if !buf.is_empty() {
                    nodes.push(Node::Text {
                        value: std::mem::take(&mut buf),
                        span: Span::new(base + buf_start, base + i),
                    });
                }
            };
        }

        macro_rules! literal {
            ($c:expr, $len:expr) => {{
                if buf.is_empty() {
                    buf_start = i;
                }
                buf.push($c);
                i += $len;
            }};
        }

        while i < bytes.len() {
            let rest = &text[i..];

            match bytes[i] {
                b'\\' => {
                    // Escaped character: taken literally
                    match rest[1..].chars().next() {
                        Some(c) => literal!(c, 1 + c.len_utf8()),
                        None => literal!('\\', 1),
                    }
                }
                b'*' => {
                    let strong = rest.starts_with("**");
                    let marker = if strong { "**" } else { "*" };
                    match find_closer(rest, marker) {
                        Some(inner) => {
                            flush!();
                            let children = self.parse_inline(inner, base + i + marker.len());
                            let consumed = marker.len() * 2 + inner.len();
                            let span = Span::new(base + i, base + i + consumed);
                            nodes.push(if strong {
                                Node::Strong { children, span }
                            } else {
                                Node::Emphasis { children, span }
                            });
                            i += consumed;
                            buf_start = i;
                        }
                        None => literal!('*', 1),
                    }
                }
                b'~' if rest.starts_with("~~") => match find_closer(rest, "~~") {
                    Some(inner) => {
                        flush!();
                        let children = self.parse_inline(inner, base + i + 2);
                        let consumed = 4 + inner.len();
                        nodes.push(Node::Delete {
                            children,
                            span: Span::new(base + i, base + i + consumed),
                        });
                        i += consumed;
                        buf_start = i;
                    }
                    None => literal!('~', 1),
                },
                b'`' => match rest[1..].find('`') {
                    Some(close) => {
                        flush!();
                        nodes.push(Node::InlineCode {
                            value: rest[1..1 + close].to_string(),
                            span: Span::new(base + i, base + i + close + 2),
                        });
                        i += close + 2;
                        buf_start = i;
                    }
                    None => literal!('`', 1),
                },
                b':' => match text_directive_open(rest) {
                    Some(directive) => {
                        flush!();
                        let attributes = self.collect_attributes(directive.frag, base + i);
                        let children = directive
                            .body
                            .map(|(b, rel)| self.parse_inline(b, base + i + rel))
                            .unwrap_or_default();
                        nodes.push(Node::TextDirective {
                            name: directive.name.to_string(),
                            attributes,
                            children,
                            span: Span::new(base + i, base + i + directive.consumed),
                        });
                        i += directive.consumed;
                        buf_start = i;
                    }
                    None => literal!(':', 1),
                },
                b'<' => match rest.find('>') {
                    Some(close) => {
                        flush!();
                        nodes.push(Node::Html {
                            value: rest[..=close].to_string(),
                            span: Span::new(base + i, base + i + close + 1),
                        });
                        i += close + 1;
                        buf_start = i;
                    }
                    None => literal!('<', 1),
                },
                _ => {
                    let c = rest.chars().next().unwrap();
                    literal!(c, c.len_utf8());
                }
            }
        }

        flush!();
        nodes
    }
}

/// Parsed shape of an inline `:name[body]{attrs}` occurrence
struct TextDirectiveOpen<'a> {
    name: &'a str,
    /// body text and its offset relative to the directive start
    body: Option<(&'a str, usize)>,
    /// attribute fragment and its offset relative to the directive start
    frag: Option<(&'a str, usize)>,
    consumed: usize,
}

/// Recognize `:name[...]` / `:name{...}` at the start of `rest`.
///
/// A bare `:word` with neither brackets nor braces is treated as prose, not
/// a directive, to avoid false positives on ordinary colon usage.
fn text_directive_open(rest: &str) -> Option<TextDirectiveOpen<'_>> {
    let after = rest.strip_prefix(':')?;
    if after.starts_with(':') {
        return None; // leaf/container fences are block constructs
    }

    let name_len = directive_name_len(after);
    if name_len == 0 {
        return None;
    }

    let name = &after[..name_len];
    let mut pos = 1 + name_len;
    let mut body = None;
    let mut frag = None;

    if rest[pos..].starts_with('[') {
        let close = find_bracket_close(&rest[pos..])?;
        body = Some((&rest[pos + 1..pos + close], pos + 1));
        pos += close + 1;
    }

    if rest[pos..].starts_with('{') {
        let close = rest[pos..].find('}')?;
        frag = Some((&rest[pos + 1..pos + close], pos + 1));
        pos += close + 1;
    }

    if body.is_none() && frag.is_none() {
        return None;
    }

    Some(TextDirectiveOpen {
        name,
        body,
        frag,
        consumed: pos,
    })
}

/// Length of a directive name at the start of `s`: a letter followed by
/// letters, digits, `_` or `-`
fn directive_name_len(s: &str) -> usize {
    let mut len = 0;
    for (idx, c) in s.char_indices() {
        let valid = if idx == 0 {
            c.is_ascii_alphabetic()
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '-'
        };
        if !valid {
            break;
        }
        len = idx + c.len_utf8();
    }
    len
}

/// Index of the `]` matching the `[` at position 0, depth-aware
fn find_bracket_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Inner text of a `marker ... marker` pair starting at position 0
fn find_closer<'a>(rest: &'a str, marker: &str) -> Option<&'a str> {
    let inner_start = marker.len();
    let close = rest[inner_start..].find(marker)?;
    if close == 0 {
        return None; // empty emphasis is prose (`**` alone)
    }
    Some(&rest[inner_start..inner_start + close])
}

/// A run of three or more colons and nothing else
fn bare_fence(line: &str) -> Option<usize> {
    if line.len() >= 3 && line.bytes().all(|b| b == b':') {
        Some(line.len())
    } else {
        None
    }
}

/// `:::name{...}`: returns (fence length, name, attribute fragment with its
/// offset within the line)
#[allow(clippy::type_complexity)]
fn container_open(line: &str) -> Option<(usize, &str, Option<(&str, usize)>)> {
    let fence_len = line.bytes().take_while(|&b| b == b':').count();
    if fence_len < 3 {
        return None;
    }

    let after = &line[fence_len..];
    let name_len = directive_name_len(after);
    if name_len == 0 {
        return None;
    }

    let name = &after[..name_len];
    let rest = &after[name_len..];

    if rest.is_empty() {
        return Some((fence_len, name, None));
    }

    let inner = rest.strip_prefix('{')?.strip_suffix('}')?;
    Some((fence_len, name, Some((inner, fence_len + name_len + 1))))
}

/// `::name[...]{...}`: leaf directive on its own line
#[allow(clippy::type_complexity)]
fn leaf_open(line: &str) -> Option<(&str, Option<&str>, Option<(&str, usize)>)> {
    let after = line.strip_prefix("::")?;
    if after.starts_with(':') {
        return None;
    }

    let name_len = directive_name_len(after);
    if name_len == 0 {
        return None;
    }

    let name = &after[..name_len];
    let mut rest = &after[name_len..];
    let mut pos = 2 + name_len;
    let mut body = None;

    if rest.starts_with('[') {
        let close = find_bracket_close(rest)?;
        body = Some(&rest[1..close]);
        pos += close + 1;
        rest = &rest[close + 1..];
    }

    let frag = if rest.is_empty() {
        None
    } else {
        let inner = rest.strip_prefix('{')?.strip_suffix('}')?;
        Some((inner, pos + 1))
    };

    Some((name, body, frag))
}

fn heading_open(line: &str) -> Option<(u8, &str)> {
    let depth = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&depth) {
        return None;
    }
    let rest = line[depth..].strip_prefix(' ')?;
    Some((depth as u8, rest))
}

fn is_thematic_break(line: &str) -> bool {
    line.len() >= 3
        && (line.bytes().all(|b| b == b'-')
            || line.bytes().all(|b| b == b'*')
            || line.bytes().all(|b| b == b'_'))
}

/// `- item`, `* item`, `+ item`, `1. item`, `1) item`.
/// Returns (ordered, content).
fn list_item_open(line: &str) -> Option<(bool, &str)> {
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
    {
        return Some((false, rest));
    }

    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 {
        let after = &line[digits..];
        if let Some(rest) = after.strip_prefix(". ").or_else(|| after.strip_prefix(") ")) {
            return Some((true, rest));
        }
    }

    None
}

/// Task-list marker: `[ ] content` / `[x] content`
fn task_marker(content: &str) -> (Option<bool>, &str) {
    if let Some(rest) = content.strip_prefix("[ ] ") {
        (Some(false), rest)
    } else if let Some(rest) = content
        .strip_prefix("[x] ")
        .or_else(|| content.strip_prefix("[X] "))
    {
        (Some(true), rest)
    } else {
        (None, content)
    }
}

fn is_delimiter_row(line: &str) -> bool {
    if !line.starts_with('|') {
        return false;
    }
    let cells = split_row(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let c = cell.trim();
            let inner = c.trim_start_matches(':').trim_end_matches(':');
            !inner.is_empty() && inner.bytes().all(|b| b == b'-')
        })
}

fn parse_alignment(cell: &str) -> Alignment {
    let c = cell.trim();
    match (c.starts_with(':'), c.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    }
}

fn split_row(line: &str) -> Vec<&str> {
    let stripped = line
        .trim_end()
        .trim_start_matches('|')
        .trim_end_matches('|');
    stripped.split('|').collect()
}

/// Lines that terminate an open paragraph
fn is_block_interrupt(line: &str) -> bool {
    bare_fence(line).is_some()
        || container_open(line).is_some()
        || leaf_open(line).is_some()
        || line.starts_with("```")
        || heading_open(line).is_some()
        || is_thematic_break(line)
        || list_item_open(line).is_some()
        || line.starts_with('|')
        || line.starts_with('<')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Node {
        from_markdown(source).root
    }

    fn root_children(node: &Node) -> &[Node] {
        node.children().expect("root has children")
    }

    #[test]
    fn test_paragraph_and_heading() {
        let root = parse("# Title\n\nSome text here");
        let children = root_children(&root);
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Node::Heading { depth: 1, .. }));
        assert!(matches!(children[1], Node::Paragraph { .. }));
    }

    #[test]
    fn test_container_directive_with_attributes() {
        let root = parse(":::accordionContent{title=\"Accordion 1\"}\nBody\n:::");
        let children = root_children(&root);
        assert_eq!(children.len(), 1);

        let Node::ContainerDirective {
            name,
            attributes,
            children,
            ..
        } = &children[0]
        else {
            panic!("expected container directive");
        };
        assert_eq!(name, "accordionContent");
        assert_eq!(attributes.get("title"), Some("Accordion 1"));
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_equal_length_fence_nesting() {
        // The wire form other authoring tools emit: inner containers use the
        // same fence length as the outer one.
        let source = ":::tabs\n:::tabContent{title=\"A\"}\nHello\n:::\n:::tabContent{title=\"B\"}\nWorld\n:::\n:::";
        let root = parse(source);
        let children = root_children(&root);
        assert_eq!(children.len(), 1);

        let Node::ContainerDirective { name, children, .. } = &children[0] else {
            panic!("expected tabs container");
        };
        assert_eq!(name, "tabs");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].attributes().unwrap().get("title"), Some("A"));
        assert_eq!(children[1].attributes().unwrap().get("title"), Some("B"));
    }

    #[test]
    fn test_longer_outer_fence_nesting() {
        let source = "::::tabs\n:::tabContent{title=\"A\"}\nHello\n:::\n::::";
        let root = parse(source);
        let children = root_children(&root);
        assert_eq!(children.len(), 1);
        let inner = children[0].children().unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].directive_name(), Some("tabContent"));
    }

    #[test]
    fn test_unclosed_directive_recovers() {
        let parsed = from_markdown(":::tabs\nsome text");
        assert_eq!(parsed.root.children().unwrap().len(), 1);
        assert!(parsed
            .diagnostics
            .iter()
            .any(|d| d.message.contains("never closed")));
    }

    #[test]
    fn test_malformed_attributes_do_not_fail() {
        let parsed = from_markdown(":::anim{id=}\ncontent\n:::");
        let children = parsed.root.children().unwrap();
        assert_eq!(children[0].directive_name(), Some("anim"));
        assert!(!children[0].attributes().unwrap().contains_key("id"));
        assert!(!parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_text_directive_inline() {
        let root = parse(":fx[some **bold** text]{color=\"blue\" type=\"circle\"}");
        let children = root_children(&root);
        let Node::Paragraph { children, .. } = &children[0] else {
            panic!("expected paragraph");
        };
        let Node::TextDirective {
            name,
            attributes,
            children,
            ..
        } = &children[0]
        else {
            panic!("expected text directive");
        };
        assert_eq!(name, "fx");
        assert_eq!(attributes.get("color"), Some("blue"));
        assert_eq!(attributes.get("type"), Some("circle"));
        assert_eq!(children.len(), 3);
        assert!(matches!(children[1], Node::Strong { .. }));
    }

    #[test]
    fn test_plain_colon_is_prose() {
        let root = parse("time: 10 minutes");
        let children = root_children(&root);
        let Node::Paragraph { children, .. } = &children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(children.len(), 1);
        let Node::Text { value, .. } = &children[0] else {
            panic!("expected text");
        };
        assert_eq!(value, "time: 10 minutes");
    }

    #[test]
    fn test_frontmatter() {
        let root = parse("---\nanimations:\n  - id: a1\n---\n\nBody");
        let children = root_children(&root);
        assert!(matches!(children[0], Node::Yaml { .. }));
        let Node::Yaml { value, .. } = &children[0] else {
            unreachable!()
        };
        assert!(value.contains("animations:"));
    }

    #[test]
    fn test_task_list_items() {
        let root = parse("- [ ] open\n- [x] done\n- plain");
        let children = root_children(&root);
        let Node::List {
            ordered, children, ..
        } = &children[0]
        else {
            panic!("expected list");
        };
        assert!(!ordered);
        assert_eq!(children.len(), 3);
        assert!(matches!(
            children[0],
            Node::ListItem {
                checked: Some(false),
                ..
            }
        ));
        assert!(matches!(
            children[1],
            Node::ListItem {
                checked: Some(true),
                ..
            }
        ));
        assert!(matches!(children[2], Node::ListItem { checked: None, .. }));
    }

    #[test]
    fn test_table() {
        let root = parse("| a | b |\n| --- | :-: |\n| c | d |");
        let children = root_children(&root);
        let Node::Table {
            align, children, ..
        } = &children[0]
        else {
            panic!("expected table");
        };
        assert_eq!(align.len(), 2);
        assert_eq!(align[1], Alignment::Center);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_strikethrough_and_code() {
        let root = parse("~~gone~~ and `code`");
        let children = root_children(&root);
        let Node::Paragraph { children, .. } = &children[0] else {
            panic!("expected paragraph");
        };
        assert!(matches!(children[0], Node::Delete { .. }));
        assert!(children.iter().any(|n| matches!(n, Node::InlineCode { .. })));
    }

    #[test]
    fn test_escaped_characters_unescape() {
        let root = parse("a \\< b \\: c");
        let children = root_children(&root);
        let Node::Paragraph { children, .. } = &children[0] else {
            panic!("expected paragraph");
        };
        let Node::Text { value, .. } = &children[0] else {
            panic!("expected text");
        };
        assert_eq!(value, "a < b : c");
    }
}
