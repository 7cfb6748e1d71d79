//! Text-effect (`fx`) rewrap and unwrap.
//!
//! An `fx` text directive wraps phrasing content with a notation effect.
//! The underlying notation engine can restyle in place but cannot change an
//! effect's *type* on a live node, so retyping and clearing both go through
//! the replace cycle: serialize the rebuilt paragraph, insert it before the
//! original block, confirm, remove the original. Only a pure color change
//! is an in-place attribute update.

use chalkmark_common::NodeKey;
use chalkmark_markdown::{to_markdown, Node};

use crate::caret::place_caret_inside;
use crate::errors::EditorError;
use crate::scheduler::{VirtualClock, COMMIT_YIELD_MS};
use crate::tree::EditableTree;

/// Desired effect styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEffect {
    /// Notation shape (`underline`, `circle`, `box`, ...)
    pub effect_type: String,
    pub color: String,
}

/// Remove the effect at `fx_index` in the block's phrasing content, keeping
/// the wrapped content. Returns the key of the replacement block.
pub fn clear_effect(
    tree: &mut EditableTree,
    block_key: &NodeKey,
    fx_index: usize,
    clock: &mut VirtualClock,
) -> Result<NodeKey, EditorError> {
    let replacement = {
        let block = tree
            .get(block_key)
            .ok_or_else(|| EditorError::NodeNotFound(block_key.clone()))?;
        let mut node = block.node().clone();
        let children = node.children_mut().ok_or(EditorError::NotTextEffect)?;

        let fx = fx_at(children, fx_index)?;
        let inner = fx.children().unwrap_or_default().to_vec();
        children.remove(fx_index);
        for (offset, unwrapped) in inner.into_iter().enumerate() {
            children.insert(fx_index + offset, unwrapped);
        }
        node
    };

    replace_block(tree, block_key, &replacement, clock)
}

/// Apply an effect change at `fx_index`.
///
/// Same type, new color: in-place attribute update, the block keeps its key.
/// New type: full replace cycle with a freshly wrapped directive.
pub fn apply_effect(
    tree: &mut EditableTree,
    block_key: &NodeKey,
    fx_index: usize,
    effect: &TextEffect,
    clock: &mut VirtualClock,
) -> Result<NodeKey, EditorError> {
    let same_type = {
        let block = tree
            .get(block_key)
            .ok_or_else(|| EditorError::NodeNotFound(block_key.clone()))?;
        let children = block.node().children().ok_or(EditorError::NotTextEffect)?;
        let fx = fx_at(children, fx_index)?;
        fx.attributes()
            .and_then(|attrs| attrs.get("type"))
            .map(|t| t == effect.effect_type)
            .unwrap_or(false)
    };

    if same_type {
        let color = effect.color.clone();
        tree.update_block(block_key, |node| {
            if let Some(fx) = node
                .children_mut()
                .and_then(|children| children.get_mut(fx_index))
            {
                if let Some(attrs) = fx.attributes_mut() {
                    attrs.set("color", color);
                }
            }
        })?;
        return Ok(block_key.clone());
    }

    let replacement = {
        let block = tree
            .get(block_key)
            .ok_or_else(|| EditorError::NodeNotFound(block_key.clone()))?;
        let mut node = block.node().clone();
        let children = node.children_mut().ok_or(EditorError::NotTextEffect)?;

        let fx = fx_at(children, fx_index)?;
        let mut attributes = fx.attributes().cloned().unwrap_or_default();
        attributes.set("type", effect.effect_type.clone());
        attributes.set("color", effect.color.clone());
        let inner = fx.children().unwrap_or_default().to_vec();

        children[fx_index] = Node::text_directive("fx", attributes, inner);
        node
    };

    replace_block(tree, block_key, &replacement, clock)
}

fn fx_at(children: &[Node], index: usize) -> Result<&Node, EditorError> {
    match children.get(index) {
        Some(node @ Node::TextDirective { name, .. }) if name == "fx" => Ok(node),
        _ => Err(EditorError::NotTextEffect),
    }
}

/// Insert-before → confirm → remove-original replace cycle for one block
fn replace_block(
    tree: &mut EditableTree,
    original: &NodeKey,
    replacement: &Node,
    clock: &mut VirtualClock,
) -> Result<NodeKey, EditorError> {
    tree.select_before(original)?;
    clock.yield_for(COMMIT_YIELD_MS);

    let inserted = tree.insert_markdown(&to_markdown(replacement))?;
    clock.yield_for(COMMIT_YIELD_MS);

    if inserted.len() != 1 {
        for key in &inserted {
            let _ = tree.remove_node(key);
        }
        return Err(EditorError::UnexpectedInsertShape(inserted.len()));
    }
    let new_key = inserted.into_iter().next().expect("length checked");
    if tree.get(&new_key).is_none() {
        return Err(EditorError::ConfirmationFailed);
    }

    tree.remove_node(original)?;
    place_caret_inside(tree, &new_key, clock);
    Ok(new_key)
}
