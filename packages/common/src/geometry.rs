use serde::{Deserialize, Serialize};

/// Bounding box of an anchor element, as reported by the embedding layer.
///
/// Only extent matters to placement computation; offsets within a label
/// directive are already relative to the anchor's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Vertically-dominant layout: taller than wide
    pub fn is_vertical(&self) -> bool {
        self.height > self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert!(Rect::new(100.0, 300.0).is_vertical());
        assert!(!Rect::new(300.0, 100.0).is_vertical());
        // Square counts as horizontal
        assert!(!Rect::new(100.0, 100.0).is_vertical());
    }
}
