//! # Chalkmark Editor
//!
//! Directive synchronization core: keeps markdown text, the abstract tree,
//! and the live editable tree consistent through structural edits.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ chalkmark-markdown: text ⇄ abstract tree    │
//! └─────────────────────────────────────────────┘
//!                     ↕
//! ┌─────────────────────────────────────────────┐
//! │ editor: live tree + replace protocol        │
//! │  - EditableTree: keys, caret, notifications │
//! │  - ContainerSession: draft → commit         │
//! │  - DirectiveIdRegistry: markdown-scan ids   │
//! │  - CaretRecovery: bounded focus re-acquire  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree has no child-mutation surface for containers**: structural
//!    edits replace whole subtrees through serialize → insert → confirm →
//!    remove-original
//! 2. **Two identity kinds**: ephemeral node keys die with every replace;
//!    only authored `id` attributes survive across edits
//! 3. **Single writer**: everything runs on one thread; yields and frames
//!    are explicit, deterministic suspension points
//! 4. **Publish only on change**: identity scans never fan out redundant
//!    notifications
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chalkmark_editor::{ContainerSession, Document, VirtualClock};
//!
//! let mut doc = Document::load("lesson.md")?;
//! let key = doc.tree().first_directive("tabs").unwrap().key().clone();
//!
//! let mut session = ContainerSession::open(doc.tree(), &key)?;
//! let draft = session.configure(doc.tree())?;
//! draft.append();
//! draft.update_label(2, "Summary");
//!
//! let mut clock = VirtualClock::new();
//! let result = session.commit(doc.tree_mut(), &mut clock)?;
//! doc.save()?;
//! ```

mod caret;
mod commit;
mod document;
mod effects;
mod errors;
mod registry;
mod scheduler;
mod selection;
mod tree;

pub use caret::{place_caret_inside, CaretOutcome, CaretRecovery, MAX_CARET_ATTEMPTS};
pub use commit::{ContainerSession, ReplaceResult, SessionState};
pub use document::{Document, DocumentStorage};
pub use effects::{apply_effect, clear_effect, TextEffect};
pub use errors::EditorError;
pub use registry::{DirectiveClickHub, DirectiveIdRegistry};
pub use scheduler::{VirtualClock, COMMIT_YIELD_MS, FRAME_INTERVAL_MS};
pub use selection::{SelectionEntry, SelectionTracker};
pub use tree::{EditableNode, EditableTree, Focus};

// Re-export common types for convenience
pub use chalkmark_common::{AuthoredId, NodeKey};
