//! # Chalkmark Directives
//!
//! Declarative knowledge about the directive catalog: descriptor registry,
//! structural family configuration, draft editing of child lists, grid
//! column migration, image-label placement, and the animation timeline
//! schema. Everything here is pure data and pure functions; the live-tree
//! mechanics live in `chalkmark-editor`.

pub mod animation;
pub mod descriptor;
pub mod draft;
pub mod families;
pub mod grid;
pub mod placement;

pub use animation::{
    AnimationConfig, AnimationConfigError, AnimationEntry, AnimationTrigger, EntranceEffect,
};
pub use descriptor::{DescriptorRegistry, DirectiveDescriptor, DirectiveKind};
pub use draft::ChildDraft;
pub use families::{StructuralFamily, ACCORDION, ALL_FAMILIES, GRID, STEPS, TABS};
pub use grid::{create_grid_cell, find_matching_preset, migrate_cells, GridPreset, GRID_PRESETS};
pub use placement::{
    label_placement, offset_from_attributes, portal_target_id, AnchorState, AnchorWatcher,
    Placement, Side, ANCHOR_POLL_ATTEMPTS, ANCHOR_POLL_INTERVAL_MS,
};
