//! # Directive Identity
//!
//! Two identity kinds that must never be conflated:
//!
//! - [`NodeKey`]: per-instance, opaque, stable only for the lifetime of one
//!   live node object. A subtree replacement destroys and recreates keys, so
//!   a key cannot track "the same logical block" across edits.
//! - [`AuthoredId`]: an author-assigned `id` attribute (e.g. on `anim` and
//!   `imageLabel` directives). The only identity that survives a replace
//!   cycle, and the one external layers (animation timeline, label panels)
//!   key on.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Generate a document seed from its path using CRC32
pub fn get_document_seed(path: &str) -> String {
    let mut buff = String::from(path);
    if !path.starts_with("file://") {
        buff = format!("file://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Ephemeral identity of one live editable node.
///
/// Compared by value, cheap to clone, and meaningless outside the lifetime
/// of the node it was minted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey(pub String);

impl NodeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable, author-assigned directive identity (the `id` attribute).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthoredId(pub String);

impl AuthoredId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AuthoredId {
    fn from(s: &str) -> Self {
        AuthoredId(s.to_string())
    }
}

impl std::fmt::Display for AuthoredId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequential [`NodeKey`] generator scoped to one document
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    seed: String, // Document seed (CRC32)
    count: u32,   // Sequential counter
}

impl KeyGenerator {
    pub fn new(path: &str) -> Self {
        Self {
            seed: get_document_seed(path),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Mint the next key. Keys are unique per generator, never reused.
    pub fn next_key(&mut self) -> NodeKey {
        self.count += 1;
        NodeKey(format!("{}-{}", self.seed, self.count))
    }

    /// Get the document seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}
