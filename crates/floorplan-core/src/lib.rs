//! Floor-Plan Core Library
//!
//! Platform-agnostic state and logic for an interactive restaurant
//! floor-plan editor: camera pan/zoom, drag-to-create tables and walls
//! with endpoint snapping, selection and manipulation, chair layout, and
//! the JSON document format. Rendering and the windowing surface live in
//! the host.

pub mod camera;
pub mod chairs;
pub mod draw;
pub mod editor;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod selection;
pub mod snap;

pub use camera::{Camera, ZOOM_STEP_FACTOR};
pub use chairs::{
    calculate_max_chair_positions, chair_positions, distribute_chair_positions, ChairDistribution,
    ChairSide, ChairSlot, CHAIR_GAP, CHAIR_SIZE,
};
pub use draw::{DrawMode, DrawState, DrawTool, NewEntity, Preview};
pub use editor::{BulkAddConfig, Editor, FloorPlan, ImportError};
pub use entities::{next_table_id, table_label, EntityId, Table, TableId, Wall, WallEndpoint, WallId};
pub use input::{PointerEvent, PointerTarget};
pub use selection::{
    Handle, HandleKind, LockPolicy, Selection, TransformOutcome, MIN_TABLE_SIZE,
};
pub use snap::{find_nearest_endpoint, SnapHit, DEFAULT_SNAP_THRESHOLD};
