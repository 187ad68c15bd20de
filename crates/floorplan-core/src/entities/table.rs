//! Table entity: a placed rectangular seating surface.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Numeric table identifier, stable for the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TableId(pub u32);

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default seat count for tables created by drag-to-draw.
pub const DEFAULT_CAPACITY: u32 = 4;

/// A rectangular table placed on the floor plan.
///
/// Position is the top-left corner in world coordinates; rotation is in
/// degrees around the center. `current_state` is an opaque order-lifecycle
/// tag owned by the POS collaborator — this core only stores and forwards
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    /// Display name, defaults to "T-{id}".
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Seat count used for display and defaults.
    pub capacity: u32,
    /// Locked tables get no resize/rotate handles.
    #[serde(default)]
    pub locked: bool,
    /// Opaque order-lifecycle tag, pass-through only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
}

impl Table {
    /// Create a table with the default label and capacity.
    pub fn new(id: TableId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            label: table_label(id, None),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            capacity: DEFAULT_CAPACITY,
            locked: false,
            current_state: None,
        }
    }

    /// Axis-aligned bounds, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Whether a world point falls inside the (unrotated) bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Generate a display label from the id, e.g. 1 -> "T-1".
pub fn table_label(id: TableId, prefix: Option<&str>) -> String {
    format!("{}{}", prefix.unwrap_or("T-"), id.0)
}

/// Return the next available table id: max existing id plus one, starting
/// at 1 when the collection is empty. Holes left by deletions are never
/// reused, so ids stay monotonic within a session.
pub fn next_table_id(tables: &[Table]) -> TableId {
    TableId(tables.iter().map(|t| t.id.0).max().map_or(1, |max| max + 1))
}
