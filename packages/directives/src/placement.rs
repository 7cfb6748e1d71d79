//! Placement computation for image-anchored directives.
//!
//! A label marker sits at a stored `[x, y]` offset within an anchor image.
//! The popover showing its content must open toward the side the marker
//! occupies and clamp to the space available there, so label content never
//! overflows the image bounds in the chosen direction.
//!
//! Anchors mount asynchronously; [`AnchorWatcher`] polls for them on a fixed
//! interval with a bounded attempt budget and a terminal never-found state,
//! so a deleted image cannot leave an indefinite background timer behind.

use chalkmark_common::Rect;
use chalkmark_markdown::Attributes;

/// Poll interval for anchor discovery
pub const ANCHOR_POLL_INTERVAL_MS: u64 = 50;
/// Attempt budget before an anchor is declared missing (2 s total)
pub const ANCHOR_POLL_ATTEMPTS: u32 = 40;

/// Which side of the marker the popover opens toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Computed popover placement with overflow clamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: Side,
    pub max_width: f64,
    pub max_height: f64,
}

/// Compute label placement from the anchor's bounding box and the marker
/// offset within it.
///
/// A taller-than-wide image chooses `top`/`bottom` by which vertical region
/// the marker occupies; otherwise `left`/`right` by the horizontal region.
/// The clamp on the chosen axis equals the smaller available space, the
/// other axis is clamped to the image extent.
pub fn label_placement(image: Rect, offset: [f64; 2]) -> Placement {
    if image.is_vertical() {
        let below = image.height - offset[1];
        if offset[1] > below {
            Placement {
                side: Side::Bottom,
                max_width: image.width,
                max_height: below,
            }
        } else {
            Placement {
                side: Side::Top,
                max_width: image.width,
                max_height: offset[1],
            }
        }
    } else {
        let right = image.width - offset[0];
        if offset[0] > right {
            Placement {
                side: Side::Right,
                max_width: right,
                max_height: image.height,
            }
        } else {
            Placement {
                side: Side::Left,
                max_width: offset[0],
                max_height: image.height,
            }
        }
    }
}

/// Marker offset from a label directive's `x`/`y` attributes.
///
/// Missing or unparseable coordinates fall back to 0, matching the
/// forgiving-parser policy.
pub fn offset_from_attributes(attributes: &Attributes) -> [f64; 2] {
    let parse = |key: &str| {
        attributes
            .get(key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    [parse("x"), parse("y")]
}

/// Element id of the portal target an image renderer provides for its labels
pub fn portal_target_id(image_id: &str) -> String {
    format!("image-labels-{}", image_id)
}

/// Discovery state for a spatial directive's anchor element
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorState {
    /// Still polling; `attempts` made so far
    Waiting { attempts: u32 },
    /// Anchor located with this bounding box
    Found(Rect),
    /// Budget exhausted; the directive renders a placeholder
    NeverFound,
}

/// Bounded poller for an anchor element that may not have mounted yet
#[derive(Debug, Clone)]
pub struct AnchorWatcher {
    anchor_id: String,
    state: AnchorState,
}

impl AnchorWatcher {
    pub fn new(anchor_id: impl Into<String>) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            state: AnchorState::Waiting { attempts: 0 },
        }
    }

    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    pub fn state(&self) -> &AnchorState {
        &self.state
    }

    /// One poll tick, driven every [`ANCHOR_POLL_INTERVAL_MS`].
    ///
    /// `lookup` resolves an element id to its bounding box, if mounted.
    /// Returns the state after the tick; once `Found` or `NeverFound` the
    /// watcher is terminal and further ticks are no-ops.
    pub fn poll<F>(&mut self, lookup: F) -> &AnchorState
    where
        F: FnOnce(&str) -> Option<Rect>,
    {
        let AnchorState::Waiting { attempts } = self.state else {
            return &self.state;
        };

        match lookup(&self.anchor_id) {
            Some(rect) => {
                self.state = AnchorState::Found(rect);
            }
            None if attempts + 1 >= ANCHOR_POLL_ATTEMPTS => {
                tracing::debug!(anchor = %self.anchor_id, "anchor never appeared, giving up");
                self.state = AnchorState::NeverFound;
            }
            None => {
                self.state = AnchorState::Waiting {
                    attempts: attempts + 1,
                };
            }
        }

        &self.state
    }
}
