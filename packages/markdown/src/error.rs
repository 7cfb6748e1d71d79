use serde::Serialize;

/// A recoverable parse problem.
///
/// Conversion never fails on malformed input: the offending fragment is
/// dropped or demoted to plain text and a diagnostic records what happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    /// Byte offset into the source where the problem was noticed
    pub offset: usize,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.offset)
    }
}
