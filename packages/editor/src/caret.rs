//! Caret recovery after subtree replacement.
//!
//! Nodes created by an insert-markdown operation are not guaranteed to be
//! visible to reads within the same update cycle in the production host, so
//! focus is re-acquired by retrying across animation frames: locate the node
//! by key, select it, and park the caret at the end of its first child. The
//! retry is bounded; past the budget the recovery gives up silently (an
//! accepted UX tradeoff, not a correctness requirement).

use chalkmark_common::NodeKey;

use crate::scheduler::VirtualClock;
use crate::tree::EditableTree;

/// Retries allowed after the first attempt (7 tries total, ~100 ms at 60 Hz)
pub const MAX_CARET_ATTEMPTS: u32 = 6;

/// Result of one recovery frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretOutcome {
    /// Node found; focus and caret restored
    Placed,
    /// Node not visible yet; retry on the next frame
    Retrying,
    /// Budget exhausted; abandoned silently
    GaveUp,
}

/// Bounded frame-driven focus recovery for one node key
#[derive(Debug, Clone)]
pub struct CaretRecovery {
    target: NodeKey,
    attempts: u32,
}

impl CaretRecovery {
    pub fn new(target: NodeKey) -> Self {
        Self {
            target,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// One animation-frame callback
    pub fn on_frame(&mut self, tree: &mut EditableTree) -> CaretOutcome {
        if tree.select_node_end(&self.target) {
            return CaretOutcome::Placed;
        }

        if self.attempts >= MAX_CARET_ATTEMPTS {
            tracing::debug!(node = %self.target, "caret recovery gave up");
            return CaretOutcome::GaveUp;
        }

        self.attempts += 1;
        CaretOutcome::Retrying
    }
}

/// Drive a recovery to completion against the frame clock.
///
/// Returns whether focus landed inside the node.
pub fn place_caret_inside(tree: &mut EditableTree, key: &NodeKey, clock: &mut VirtualClock) -> bool {
    let mut recovery = CaretRecovery::new(key.clone());
    loop {
        clock.frame();
        match recovery.on_frame(tree) {
            CaretOutcome::Placed => return true,
            CaretOutcome::GaveUp => return false,
            CaretOutcome::Retrying => {}
        }
    }
}
