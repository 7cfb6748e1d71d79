//! # Directive Identity Tracking
//!
//! Keeps auxiliary UI (order badges, animation panels) in sync with the
//! document without walking the live tree. On every markdown-changed
//! notification the registry re-derives the ordered id list for one
//! directive family by scanning the text for the family's opening fences.
//! Full tree walks are expensive and these nodes are presence/order markers
//! only.
//!
//! The derived list is published to subscribers only when it differs from
//! the previously published one, so redundant notifications cannot fan out
//! into re-render storms.

use std::collections::{HashMap, VecDeque};

use chalkmark_common::AuthoredId;
use regex::Regex;

/// Scans markdown for one directive family's authored ids
pub struct DirectiveIdRegistry {
    directive: String,
    open_fence: Regex,
    id_eq: Regex,
    id_hash: Regex,
    last: Vec<AuthoredId>,
    seq: u64,
    subscribers: Vec<Box<dyn FnMut(&[AuthoredId])>>,
}

impl std::fmt::Debug for DirectiveIdRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveIdRegistry")
            .field("directive", &self.directive)
            .field("last", &self.last)
            .field("seq", &self.seq)
            .field(
                "subscribers",
                &format!("{} subscribers", self.subscribers.len()),
            )
            .finish()
    }
}

impl DirectiveIdRegistry {
    /// Registry for a directive family, e.g. `anim`
    pub fn new(directive: &str) -> Self {
        let open_fence = Regex::new(&format!(
            r"(?m)^:{{3,}}{}\{{([^}}]*)\}}",
            regex::escape(directive)
        ))
        .expect("valid fence pattern");

        Self {
            directive: directive.to_string(),
            open_fence,
            // id="value" form
            id_eq: Regex::new(r#"\bid\s*=\s*"([^"]+)""#).expect("valid id pattern"),
            // #value shorthand form
            id_hash: Regex::new(r"#([A-Za-z0-9_-]+)").expect("valid hash pattern"),
            last: Vec::new(),
            seq: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    /// Last published ids, unique and sorted
    pub fn ids(&self) -> &[AuthoredId] {
        &self.last
    }

    /// Presence query for consumers that do not need order
    pub fn contains(&self, id: &str) -> bool {
        self.last.iter().any(|known| known.as_str() == id)
    }

    /// Subscribe to published id lists
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&[AuthoredId]) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Re-derive ids from markdown; publish only if changed.
    ///
    /// Returns whether a publish happened. `reason` is instrumentation only.
    pub fn update_from_markdown(&mut self, markdown: &str, reason: &str) -> bool {
        let ids = self.extract_ids(markdown);
        let changed = ids.len() != self.last.len()
            || ids.iter().zip(self.last.iter()).any(|(a, b)| a != b);

        self.seq += 1;
        tracing::debug!(
            directive = %self.directive,
            seq = self.seq,
            reason,
            changed,
            count = ids.len(),
            "identity scan"
        );

        if !changed {
            return false;
        }

        self.last = ids;
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for subscriber in &mut subscribers {
            subscriber(&self.last);
        }
        self.subscribers = subscribers;
        true
    }

    /// Unique, sorted ids from the family's opening fences.
    ///
    /// Both `id="x"` and `#x` attribute forms count. Duplicate authored ids
    /// collapse here; the collision is logged rather than rejected.
    fn extract_ids(&self, markdown: &str) -> Vec<AuthoredId> {
        let mut ids: Vec<String> = Vec::new();
        for capture in self.open_fence.captures_iter(markdown) {
            let attrs = capture.get(1).map(|m| m.as_str()).unwrap_or("");
            let id = self
                .id_eq
                .captures(attrs)
                .or_else(|| self.id_hash.captures(attrs))
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            if let Some(id) = id {
                if ids.contains(&id) {
                    tracing::warn!(directive = %self.directive, id = %id, "duplicate authored id");
                    continue;
                }
                ids.push(id);
            }
        }
        ids.sort();
        ids.into_iter().map(AuthoredId).collect()
    }
}

type ClickHandler = Box<dyn FnMut(&AuthoredId)>;

/// Click-to-select dispatch for directive badges.
///
/// A family may register a custom handler; without one, clicks land on a
/// generic notification channel for an external layer to drain.
#[derive(Default)]
pub struct DirectiveClickHub {
    handlers: HashMap<String, ClickHandler>,
    pending: VecDeque<(String, AuthoredId)>,
}

impl std::fmt::Debug for DirectiveClickHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveClickHub")
            .field("handlers", &format!("{} handlers", self.handlers.len()))
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl DirectiveClickHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the click handler for one directive family
    pub fn register<F>(&mut self, directive: &str, handler: F)
    where
        F: FnMut(&AuthoredId) + 'static,
    {
        self.handlers.insert(directive.to_string(), Box::new(handler));
    }

    /// A directive's badge was clicked
    pub fn click(&mut self, directive: &str, id: &AuthoredId) {
        match self.handlers.get_mut(directive) {
            Some(handler) => handler(id),
            None => self.pending.push_back((directive.to_string(), id.clone())),
        }
    }

    /// Drain clicks that no handler claimed
    pub fn drain_unhandled(&mut self) -> Vec<(String, AuthoredId)> {
        self.pending.drain(..).collect()
    }
}
