//! Tokenizer for directive attribute fragments.
//!
//! Covers the brace-delimited list after a directive name:
//! `{title="Accordion 1" #anim_1 .wide disabled}`. Values are always
//! double-quoted strings; a bare name is a boolean-like flag; `#x` and `.x`
//! are shorthand for `id` and `class`.

use crate::ast::Attributes;
use crate::error::Diagnostic;
use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
pub enum AttrToken<'src> {
    #[regex(r"#[A-Za-z0-9_-]+", |lex| &lex.slice()[1..])]
    IdShorthand(&'src str),

    #[regex(r"\.[A-Za-z0-9_-]+", |lex| &lex.slice()[1..])]
    ClassShorthand(&'src str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_:-]*")]
    Name(&'src str),

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    Quoted(&'src str),
}

/// Parse the inside of a `{...}` attribute fragment.
///
/// Malformed pieces are dropped with a diagnostic; parsing always succeeds.
/// `base_offset` is the byte offset of the fragment within the document, used
/// for diagnostic positions.
pub fn parse_attributes(fragment: &str, base_offset: usize) -> (Attributes, Vec<Diagnostic>) {
    let mut attrs = Attributes::new();
    let mut diagnostics = Vec::new();

    let mut lexer = AttrToken::lexer(fragment).spanned().peekable();

    while let Some((token, span)) = lexer.next() {
        match token {
            Ok(AttrToken::IdShorthand(id)) => {
                attrs.set("id", id);
            }
            Ok(AttrToken::ClassShorthand(class)) => {
                // Multiple .x shorthands accumulate, space-separated
                match attrs.get("class") {
                    Some(existing) => {
                        let merged = format!("{} {}", existing, class);
                        attrs.set("class", merged);
                    }
                    None => attrs.set("class", class),
                }
            }
            Ok(AttrToken::Name(name)) => {
                // Peek for `= "value"`; a bare name is a flag
                if matches!(lexer.peek(), Some((Ok(AttrToken::Equals), _))) {
                    lexer.next();
                    match lexer.next() {
                        Some((Ok(AttrToken::Quoted(value)), _)) => {
                            attrs.insert(name, Some(value.to_string()));
                        }
                        other => {
                            let at = other
                                .map(|(_, s)| base_offset + s.start)
                                .unwrap_or(base_offset + fragment.len());
                            diagnostics.push(Diagnostic::new(
                                format!("attribute `{}` is missing a quoted value", name),
                                at,
                            ));
                        }
                    }
                } else {
                    attrs.insert(name, None);
                }
            }
            Ok(AttrToken::Equals) => {
                diagnostics.push(Diagnostic::new(
                    "stray `=` in attribute list",
                    base_offset + span.start,
                ));
            }
            Ok(AttrToken::Quoted(_)) => {
                diagnostics.push(Diagnostic::new(
                    "quoted value without an attribute name",
                    base_offset + span.start,
                ));
            }
            Err(_) => {
                diagnostics.push(Diagnostic::new(
                    format!("unparseable attribute fragment `{}`", &fragment[span.clone()]),
                    base_offset + span.start,
                ));
            }
        }
    }

    (attrs, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_values() {
        let (attrs, diags) = parse_attributes(r#"title="Accordion 1" color="blue""#, 0);
        assert!(diags.is_empty());
        assert_eq!(attrs.get("title"), Some("Accordion 1"));
        assert_eq!(attrs.get("color"), Some("blue"));
    }

    #[test]
    fn test_flags_and_shorthands() {
        let (attrs, diags) = parse_attributes(r#"#anim_1 .wide disabled"#, 0);
        assert!(diags.is_empty());
        assert_eq!(attrs.get("id"), Some("anim_1"));
        assert_eq!(attrs.get("class"), Some("wide"));
        assert!(attrs.contains_key("disabled"));
        assert_eq!(attrs.get("disabled"), None);
    }

    #[test]
    fn test_malformed_fragment_is_dropped_not_fatal() {
        let (attrs, diags) = parse_attributes(r#"title= color="blue""#, 0);
        // `title=` swallows the next token looking for its value, so the
        // malformed run is dropped with diagnostics and parsing continues
        assert!(!diags.is_empty());
        assert!(!attrs.contains_key("title"));

        let (attrs, diags) = parse_attributes(r#"€€ title="ok""#, 0);
        assert!(!diags.is_empty());
        assert_eq!(attrs.get("title"), Some("ok"));
    }

    #[test]
    fn test_order_preserved() {
        let (attrs, _) = parse_attributes(r#"b="2" a="1""#, 0);
        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
