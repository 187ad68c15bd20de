//! Pointer contract between the host surface and the editor.

use crate::entities::{TableId, WallId};
use crate::selection::HandleKind;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// What the pointer was over when the event fired, resolved by the host's
/// hit testing (the rendering surface knows the drawn geometry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Empty canvas.
    Empty,
    Table(TableId),
    Wall(WallId),
    /// A manipulation handle of the selected entity.
    Handle(HandleKind),
}

impl PointerTarget {
    pub fn is_table(&self) -> bool {
        matches!(self, PointerTarget::Table(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PointerTarget::Empty)
    }
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        target: PointerTarget,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
        ctrl_held: bool,
    },
}

impl PointerEvent {
    /// Screen position of the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::Scroll { position, .. } => *position,
        }
    }
}
