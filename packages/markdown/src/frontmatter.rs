//! YAML frontmatter extraction.
//!
//! The animation-wrapper family's timeline configuration lives in a
//! frontmatter block; the directive core itself reads only the document
//! body. This split lets config consumers avoid a full parse.

/// A document split into optional frontmatter and body text
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter<'src> {
    /// Raw YAML between the `---` delimiters, without them
    pub yaml: Option<&'src str>,
    /// Everything after the closing delimiter (or the whole source)
    pub body: &'src str,
}

/// Split a document into frontmatter and body.
///
/// Frontmatter is recognized only when the document starts with `---` on its
/// own line and a closing `---` line exists; otherwise the whole source is
/// body.
pub fn split_frontmatter(source: &str) -> Frontmatter<'_> {
    let Some(after_open) = source.strip_prefix("---\n") else {
        return Frontmatter {
            yaml: None,
            body: source,
        };
    };

    // Closing delimiter: a `---` line
    let close = after_open.find("\n---").map(|idx| {
        let after = &after_open[idx + 4..];
        (idx, after.strip_prefix('\n').unwrap_or(after))
    });

    match close {
        Some((idx, body)) => Frontmatter {
            yaml: Some(&after_open[..idx]),
            body,
        },
        None => Frontmatter {
            yaml: None,
            body: source,
        },
    }
}
