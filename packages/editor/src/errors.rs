//! Error types for the editor

use chalkmark_common::NodeKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Node {0} is not a `{1}` container")]
    NotFamilyContainer(NodeKey, String),

    #[error("session has no draft to commit")]
    NotConfiguring,

    #[error("commit produced {0} blocks, expected exactly one container")]
    UnexpectedInsertShape(usize),

    #[error("inserted subtree failed confirmation; original node left in place")]
    ConfirmationFailed,

    #[error("Document is not file-backed")]
    NotFileBacked,

    #[error("target is not a text-effect directive")]
    NotTextEffect,
}
