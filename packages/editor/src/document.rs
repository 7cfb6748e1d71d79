//! # Document Handle
//!
//! One markdown document and its editing state. Documents are either
//! memory-backed (temporary, tests) or file-backed (single-user editing
//! with disk persistence). The live tree inside is the single source of
//! truth; saving serializes it back to canonical markdown.

use std::path::{Path, PathBuf};

use crate::errors::EditorError;
use crate::tree::EditableTree;

/// Editable chalkmark document
#[derive(Debug)]
pub struct Document {
    /// Path to the source file (seed for node keys even when memory-backed)
    pub path: PathBuf,
    storage: DocumentStorage,
}

/// Storage backend for a document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { tree: EditableTree },

    /// File-backed (single-user editing)
    File { tree: EditableTree, dirty: bool },
}

impl Document {
    /// Create a document from source text (memory-backed)
    pub fn from_source(path: PathBuf, source: &str) -> Self {
        let tree = EditableTree::from_markdown_source(&path.to_string_lossy(), source);
        Self {
            path,
            storage: DocumentStorage::Memory { tree },
        }
    }

    /// Load a document from disk (file-backed)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path)?;
        let tree = EditableTree::from_markdown_source(&path.to_string_lossy(), &source);

        Ok(Self {
            path,
            storage: DocumentStorage::File { tree, dirty: false },
        })
    }

    /// The live tree
    pub fn tree(&self) -> &EditableTree {
        match &self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Mutable tree access; marks file-backed documents dirty
    pub fn tree_mut(&mut self) -> &mut EditableTree {
        match &mut self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, dirty } => {
                *dirty = true;
                tree
            }
        }
    }

    /// Document version: bumps on every tree mutation
    pub fn version(&self) -> u64 {
        self.tree().revision()
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            _ => false,
        }
    }

    /// Serialize the tree and write it back (file-backed only)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { tree, dirty } => {
                std::fs::write(&self.path, tree.markdown())?;
                *dirty = false;
                Ok(())
            }
            _ => Err(EditorError::NotFileBacked),
        }
    }
}
