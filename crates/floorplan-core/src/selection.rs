//! Selection and manipulation of placed entities.

use crate::entities::{EntityId, Table, Wall, WallEndpoint};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Hard minimum for a table dimension after a resize commit.
pub const MIN_TABLE_SIZE: f64 = 30.0;

/// What locking means for dragging. Resize/rotate handles always detach
/// from a locked table; whether it may still be drag-moved is a host
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockPolicy {
    /// A locked table keeps no handles but can still be moved.
    #[default]
    MoveAllowed,
    /// A locked table is fully immobile.
    FullyFrozen,
}

/// The single-entity selection.
///
/// Holds at most one id from either collection; selecting a new entity
/// replaces the previous one, clicking empty canvas clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection(Option<EntityId>);

impl Selection {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn select(&mut self, id: impl Into<EntityId>) {
        self.0 = Some(id.into());
    }

    pub fn set(&mut self, id: Option<EntityId>) {
        self.0 = id;
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn selected(&self) -> Option<&EntityId> {
        self.0.as_ref()
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.0.as_ref() == Some(id)
    }
}

/// A manipulation handle on a selected entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    /// Position in world coordinates.
    pub position: Point,
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    // Corner handles for the table transformer
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    // Rotation handle
    Rotate,
    // Wall endpoint handles
    Endpoint(WallEndpoint),
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check if a world point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Distance from the table's top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Transformer handles for a table, rotated with the table around its
/// center. A locked table gets no handles at all — the transformer
/// detaches.
pub fn table_handles(table: &Table) -> Option<Vec<Handle>> {
    if table.locked {
        return None;
    }

    let center = table.center();
    let half_w = table.width / 2.0;
    let half_h = table.height / 2.0;
    let rot = table.rotation.to_radians();
    let (sin_r, cos_r) = rot.sin_cos();

    let at = |dx: f64, dy: f64| {
        Point::new(
            center.x + dx * cos_r - dy * sin_r,
            center.y + dx * sin_r + dy * cos_r,
        )
    };

    Some(vec![
        Handle::new(HandleKind::TopLeft, at(-half_w, -half_h)),
        Handle::new(HandleKind::TopRight, at(half_w, -half_h)),
        Handle::new(HandleKind::BottomLeft, at(-half_w, half_h)),
        Handle::new(HandleKind::BottomRight, at(half_w, half_h)),
        Handle::new(HandleKind::Rotate, at(0.0, -half_h - ROTATE_HANDLE_OFFSET)),
    ])
}

/// Endpoint handles for a wall segment.
pub fn wall_handles(wall: &Wall) -> Vec<Handle> {
    vec![
        Handle::new(HandleKind::Endpoint(WallEndpoint::Start), wall.start()),
        Handle::new(HandleKind::Endpoint(WallEndpoint::End), wall.end()),
    ]
}

/// Whether a table may be drag-moved under the given policy.
pub fn can_move(table: &Table, policy: LockPolicy) -> bool {
    !table.locked || policy == LockPolicy::MoveAllowed
}

/// Commit a drag-move: update the table position to the drop point.
pub fn apply_drag_end(table: &mut Table, x: f64, y: f64) {
    table.x = x;
    table.y = y;
}

/// Outcome of a transform commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    Applied,
    /// At least one effective dimension fell below [`MIN_TABLE_SIZE`]; the
    /// table was left untouched.
    Rejected,
}

/// Commit a resize/rotate from the transformer.
///
/// The live transform scales the node; on commit the scale is baked into
/// width/height and reset to 1. The minimum-size check is all-or-nothing:
/// if either effective dimension would end up below 30, nothing is
/// applied — not even the other axis or the rotation.
pub fn apply_transform_end(
    table: &mut Table,
    x: f64,
    y: f64,
    scale_x: f64,
    scale_y: f64,
    rotation_deg: f64,
) -> TransformOutcome {
    let new_width = table.width * scale_x;
    let new_height = table.height * scale_y;

    if new_width < MIN_TABLE_SIZE || new_height < MIN_TABLE_SIZE {
        return TransformOutcome::Rejected;
    }

    table.x = x;
    table.y = y;
    table.width = new_width;
    table.height = new_height;
    table.rotation = rotation_deg;
    TransformOutcome::Applied
}

/// Flip the lock flag on a table.
pub fn toggle_lock(table: &mut Table) {
    table.locked = !table.locked;
}
