//! Chair layout: derived seat slots around a table's perimeter.

use serde::{Deserialize, Serialize};

/// Visual footprint of one chair, in world units.
pub const CHAIR_SIZE: f64 = 32.0;
/// Gap between adjacent chairs.
pub const CHAIR_GAP: f64 = 8.0;

/// Which table edge a chair sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChairSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// Chair counts per side for a table of a given width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChairDistribution {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

/// A derived seat slot. Not stored anywhere — recomputed from the table
/// dimensions on demand. `index` is assigned in a fixed enumeration order
/// (top, right, bottom, left) so it can serve as a durable seat identity
/// for bill splitting as long as the table keeps its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChairSlot {
    /// Durable index, 0-based in enumeration order.
    pub index: usize,
    pub side: ChairSide,
    /// Position along the side (left-to-right or top-to-bottom).
    pub position: usize,
    /// Total chairs on this side.
    pub total: usize,
}

/// How many chairs fit on each side. Opposite sides always get the same
/// count; every side fits at least one chair.
pub fn distribute_chair_positions(width: f64, height: f64) -> ChairDistribution {
    let spacing = CHAIR_SIZE + CHAIR_GAP;
    let horizontal = (((width + CHAIR_GAP) / spacing).floor() as usize).max(1);
    let vertical = (((height + CHAIR_GAP) / spacing).floor() as usize).max(1);
    ChairDistribution {
        top: horizontal,
        right: vertical,
        bottom: horizontal,
        left: vertical,
    }
}

/// Total number of chair positions around the table.
pub fn calculate_max_chair_positions(width: f64, height: f64) -> usize {
    let d = distribute_chair_positions(width, height);
    d.top + d.right + d.bottom + d.left
}

/// Enumerate every seat slot in the fixed order: all top slots
/// left-to-right, then right top-to-bottom, then bottom left-to-right,
/// then left top-to-bottom.
pub fn chair_positions(width: f64, height: f64) -> Vec<ChairSlot> {
    let d = distribute_chair_positions(width, height);
    let max = calculate_max_chair_positions(width, height);
    let mut slots = Vec::with_capacity(max);

    let sides = [
        (ChairSide::Top, d.top),
        (ChairSide::Right, d.right),
        (ChairSide::Bottom, d.bottom),
        (ChairSide::Left, d.left),
    ];
    let mut index = 0;
    for (side, total) in sides {
        for position in 0..total {
            slots.push(ChairSlot {
                index,
                side,
                position,
                total,
            });
            index += 1;
        }
    }

    slots.truncate(max);
    slots
}
