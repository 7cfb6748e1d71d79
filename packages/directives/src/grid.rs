//! Grid layout presets and column migration.
//!
//! A grid container holds one `grid` cell directive per column. Changing the
//! preset migrates content: expanding appends empty cells, shrinking merges
//! the removed trailing cells into the last retained cell behind a thematic
//! break, so no authored content is silently discarded.

use chalkmark_markdown::{Attributes, Node};

/// A selectable grid layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub columns: usize,
}

pub const GRID_PRESETS: [GridPreset; 4] = [
    GridPreset {
        id: "single",
        name: "1 Column",
        columns: 1,
    },
    GridPreset {
        id: "halves",
        name: "2 Columns",
        columns: 2,
    },
    GridPreset {
        id: "thirds",
        name: "3 Columns",
        columns: 3,
    },
    GridPreset {
        id: "quarters",
        name: "4 Columns",
        columns: 4,
    },
];

/// Preset whose column count matches the current cell count
pub fn find_matching_preset(cell_count: usize) -> Option<GridPreset> {
    GRID_PRESETS.iter().copied().find(|p| p.columns == cell_count)
}

/// A fresh empty grid cell
pub fn create_grid_cell() -> Node {
    let mut attributes = Attributes::new();
    attributes.set("textAlign", "left");
    Node::container_directive("grid", attributes, vec![Node::paragraph(vec![Node::text("")])])
}

/// Migrate cell content to a new column count.
///
/// Expanding (or keeping) the count leaves existing cells byte-identical and
/// appends empty cells. Shrinking merges every removed cell's children into
/// the last kept cell, each group separated by a thematic break.
pub fn migrate_cells(cells: &[Node], preset: GridPreset) -> Vec<Node> {
    let current_count = cells.len();
    let new_count = preset.columns;

    if new_count >= current_count {
        let mut result = cells.to_vec();
        for _ in current_count..new_count {
            result.push(create_grid_cell());
        }
        return result;
    }

    let kept = &cells[..new_count];
    let removed = &cells[new_count..];
    let last_kept_index = new_count - 1;

    let mut result = kept.to_vec();
    if let Some(children) = result[last_kept_index].children_mut() {
        for cell in removed {
            children.push(Node::thematic_break());
            children.extend(cell.children().unwrap_or_default().iter().cloned());
        }
    }

    result
}
