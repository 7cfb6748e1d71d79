//! # Chalkmark Markdown
//!
//! Conversion utility between markdown text and the abstract document tree.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ from_markdown: text → tree + diagnostics    │
//! └─────────────────────────────────────────────┘
//!                     ↕
//! ┌─────────────────────────────────────────────┐
//! │ to_markdown: tree → canonical text          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Both directions are pure. Parsing is forgiving (malformed input degrades
//! with diagnostics, never an error) and the pair is idempotent:
//! `to_markdown(from_markdown(to_markdown(t)))` equals `to_markdown(t)` for
//! any tree that round-trips through the supported extension set.

pub mod ast;
pub mod error;
pub mod frontmatter;
pub mod parser;
pub mod serializer;
pub mod style;
pub mod tokenizer;

pub use ast::{Alignment, Attributes, Node, Span};
pub use error::Diagnostic;
pub use frontmatter::{split_frontmatter, Frontmatter};
pub use parser::{from_markdown, Parsed, Parser};
pub use serializer::{to_markdown, Serializer};
pub use style::parse_style_string;
pub use tokenizer::parse_attributes;
