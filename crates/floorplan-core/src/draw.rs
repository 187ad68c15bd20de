//! Draw tool: the table/wall creation state machine.

use crate::entities::{next_table_id, Table, Wall, WallId};
use crate::snap::{self, SnapHit};
use kurbo::{Point, Rect};
use log::debug;
use serde::{Deserialize, Serialize};

/// Minimum rectangle dimension for a table gesture to commit. Anything
/// smaller is a stray click, not a drag.
pub const MIN_TABLE_DRAW_SIZE: f64 = 4.0;
/// Minimum segment length for a wall gesture to commit (strict).
pub const MIN_WALL_LENGTH: f64 = 10.0;

/// The active drawing mode. Table and wall drawing share the pointer
/// stream, so exactly one mode can be armed at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawMode {
    /// No drawing; pointer events go to selection.
    #[default]
    None,
    /// Drag-to-create tables.
    Table,
    /// Drag-to-create wall segments.
    Wall,
}

/// State of the in-progress gesture.
#[derive(Debug, Clone, Copy, Default)]
pub enum DrawState {
    /// Armed but not dragging.
    #[default]
    Idle,
    /// A drag is in progress.
    Drawing {
        /// Drag origin in world coordinates (already snapped in wall mode).
        origin: Point,
        /// Current pointer position in world coordinates.
        current: Point,
        /// Whether the origin was pulled onto an existing endpoint.
        snapped_start: bool,
    },
}

/// Derived preview geometry for the gesture in progress.
///
/// Recomputed from the drag state on demand rather than mutated in place,
/// so a cancelled gesture can never leave stale geometry behind.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Normalized rectangle containing both drag points.
    Rect(Rect),
    /// Live wall segment with the end point already snapped.
    Wall {
        points: [f64; 4],
        /// Active end snap, for the indicator.
        snap: Option<Point>,
    },
}

/// An entity committed by a finished gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEntity {
    Table(Table),
    Wall(Wall),
}

/// The drawing state machine.
#[derive(Debug, Clone)]
pub struct DrawTool {
    pub mode: DrawMode,
    pub state: DrawState,
    snap_threshold: f64,
}

impl Default for DrawTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTool {
    pub fn new() -> Self {
        Self {
            mode: DrawMode::None,
            state: DrawState::Idle,
            snap_threshold: snap::DEFAULT_SNAP_THRESHOLD,
        }
    }

    /// Toggle table-draw mode. Arming it disarms wall mode; any toggle
    /// cancels the gesture in progress.
    pub fn toggle_table_mode(&mut self) {
        self.mode = if self.mode == DrawMode::Table {
            DrawMode::None
        } else {
            DrawMode::Table
        };
        self.cancel();
    }

    /// Toggle wall-draw mode. Arming it disarms table mode.
    pub fn toggle_wall_mode(&mut self) {
        self.mode = if self.mode == DrawMode::Wall {
            DrawMode::None
        } else {
            DrawMode::Wall
        };
        self.cancel();
    }

    /// Whether a drawing mode is armed.
    pub fn is_armed(&self) -> bool {
        self.mode != DrawMode::None
    }

    /// Whether a drag is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Discard the gesture in progress. Preview and indicators derive from
    /// the state, so they disappear with it.
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
    }

    /// Begin a gesture at a world point.
    ///
    /// Ignored when no mode is armed or when the pointer is over an
    /// existing table — drawing must start on empty canvas. A down that
    /// arrives while a previous gesture is still open discards that
    /// gesture and starts fresh.
    pub fn pointer_down(&mut self, world: Point, over_table: bool, walls: &[Wall]) {
        if !self.is_armed() || over_table {
            return;
        }

        let (origin, snapped_start) = if self.mode == DrawMode::Wall {
            match snap::find_nearest_endpoint(world, walls, self.snap_threshold, None) {
                Some(hit) => (hit.point, true),
                None => (world, false),
            }
        } else {
            (world, false)
        };

        self.state = DrawState::Drawing {
            origin,
            current: origin,
            snapped_start,
        };
    }

    /// Update the gesture with a new world point.
    pub fn pointer_move(&mut self, world: Point) {
        if let DrawState::Drawing { current, .. } = &mut self.state {
            *current = world;
        }
    }

    /// Compute the preview for the gesture in progress.
    pub fn preview(&self, walls: &[Wall]) -> Option<Preview> {
        let DrawState::Drawing {
            origin, current, ..
        } = self.state
        else {
            return None;
        };

        match self.mode {
            DrawMode::None => None,
            DrawMode::Table => Some(Preview::Rect(normalized_rect(origin, current))),
            DrawMode::Wall => {
                let snap =
                    snap::find_nearest_endpoint(current, walls, self.snap_threshold, None);
                let end = snap.as_ref().map_or(current, |hit| hit.point);
                Some(Preview::Wall {
                    points: [origin.x, origin.y, end.x, end.y],
                    snap: snap.map(|SnapHit { point, .. }| point),
                })
            }
        }
    }

    /// Position of the start-snap indicator, when active.
    pub fn start_indicator(&self) -> Option<Point> {
        match self.state {
            DrawState::Drawing {
                origin,
                snapped_start: true,
                ..
            } => Some(origin),
            _ => None,
        }
    }

    /// Finish the gesture and commit an entity if it clears the size
    /// thresholds. The mode stays armed so entities can be created in
    /// rapid succession; an up with no open gesture is ignored.
    pub fn pointer_up(&mut self, tables: &[Table], walls: &[Wall]) -> Option<NewEntity> {
        if !self.is_drawing() {
            return None;
        }
        let preview = self.preview(walls);
        self.state = DrawState::Idle;

        match preview? {
            Preview::Rect(rect) => {
                if rect.width() < MIN_TABLE_DRAW_SIZE || rect.height() < MIN_TABLE_DRAW_SIZE {
                    return None;
                }
                let id = next_table_id(tables);
                let table = Table::new(
                    id,
                    rect.x0.round(),
                    rect.y0.round(),
                    rect.width().round(),
                    rect.height().round(),
                );
                debug!("created table {} at ({}, {})", table.id, table.x, table.y);
                Some(NewEntity::Table(table))
            }
            Preview::Wall { points, .. } => {
                let dx = points[2] - points[0];
                let dy = points[3] - points[1];
                if (dx * dx + dy * dy).sqrt() < MIN_WALL_LENGTH {
                    return None;
                }
                let wall = Wall::new(WallId::generate(), points.map(f64::round));
                debug!("created wall {}", wall.id);
                Some(NewEntity::Wall(wall))
            }
        }
    }
}

/// Normalize two drag points into a rectangle with non-negative extents.
/// Both points lie on the boundary; extents are at least 1.
fn normalized_rect(a: Point, b: Point) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let width = (b.x - a.x).abs().max(1.0);
    let height = (b.y - a.y).abs().max(1.0);
    Rect::new(x, y, x + width, y + height)
}
