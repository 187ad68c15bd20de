//! Editor session: document, event routing and mutation entry points.

use crate::camera::Camera;
use crate::draw::{DrawTool, NewEntity};
use crate::entities::{
    next_table_id, EntityId, Table, TableId, Wall, WallEndpoint, WallId,
};
use crate::geometry::{grid_position, point_near_wall};
use crate::input::{PointerEvent, PointerTarget};
use crate::selection::{
    self, Handle, LockPolicy, Selection, TransformOutcome,
};
use crate::snap::{self, SnapHit};
use kurbo::Point;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Hit tolerance for selecting a wall by clicking near it.
const WALL_HIT_TOLERANCE: f64 = 5.0;

/// The persisted floor-plan document: every table and wall segment.
///
/// Serialized verbatim as `{ "tables": [...], "lines": [...] }` — the
/// wire name for walls stays `lines` for compatibility with existing
/// layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub tables: Vec<Table>,
    #[serde(rename = "lines")]
    pub walls: Vec<Wall>,
}

/// Why an imported document was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("wall {0} has non-finite coordinates")]
    NonFiniteWall(WallId),
    #[error("duplicate table id {0}")]
    DuplicateTableId(TableId),
    #[error("duplicate wall id {0}")]
    DuplicateWallId(WallId),
}

impl FloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let plan: FloorPlan = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check the document invariants: unique ids per collection and
    /// finite wall coordinates.
    pub fn validate(&self) -> Result<(), ImportError> {
        let mut table_ids = HashSet::new();
        for table in &self.tables {
            if !table_ids.insert(table.id) {
                return Err(ImportError::DuplicateTableId(table.id));
            }
        }
        let mut wall_ids = HashSet::new();
        for wall in &self.walls {
            if !wall.is_finite() {
                return Err(ImportError::NonFiniteWall(wall.id.clone()));
            }
            if !wall_ids.insert(wall.id.clone()) {
                return Err(ImportError::DuplicateWallId(wall.id.clone()));
            }
        }
        Ok(())
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn wall(&self, id: &WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == *id)
    }

    pub fn wall_mut(&mut self, id: &WallId) -> Option<&mut Wall> {
        self.walls.iter_mut().find(|w| w.id == *id)
    }
}

/// Configuration for the bulk "add N tables" command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAddConfig {
    pub width: f64,
    pub height: f64,
    pub capacity: u32,
    /// Top-left of the placement grid in world coordinates.
    pub origin: Point,
    /// Center-to-center spacing between grid slots.
    pub spacing: f64,
}

impl Default for BulkAddConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 80.0,
            capacity: 4,
            origin: Point::new(100.0, 100.0),
            spacing: 160.0,
        }
    }
}

/// An editor session over one floor plan.
///
/// Owns the entity collections, the camera and all interaction state.
/// Pointer events route through the camera (for world coordinates), then
/// to the draw tool when a mode is armed, else to selection — the two
/// never see the same gesture.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub plan: FloorPlan,
    pub camera: Camera,
    pub draw: DrawTool,
    selection: Selection,
    pub lock_policy: LockPolicy,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            plan: FloorPlan::new(),
            camera: Camera::new(),
            draw: DrawTool::new(),
            selection: Selection::new(),
            lock_policy: LockPolicy::default(),
        }
    }

    pub fn with_plan(plan: FloorPlan) -> Self {
        Self {
            plan,
            ..Self::new()
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.plan.tables
    }

    pub fn walls(&self) -> &[Wall] {
        &self.plan.walls
    }

    pub fn selected(&self) -> Option<&EntityId> {
        self.selection.selected()
    }

    /// Route a pointer event from the host surface.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        trace!("pointer event: {event:?}");
        match event {
            PointerEvent::Scroll {
                position,
                delta,
                ctrl_held,
            } => {
                self.camera.wheel_zoom(position, delta.y, ctrl_held);
            }
            PointerEvent::Down { position, target } => {
                let world = self.camera.screen_to_world(position);
                if self.draw.is_armed() {
                    self.draw
                        .pointer_down(world, target.is_table(), &self.plan.walls);
                } else {
                    match target {
                        PointerTarget::Empty => self.selection.clear(),
                        PointerTarget::Table(id) => self.select(Some(EntityId::Table(id))),
                        PointerTarget::Wall(id) => self.select(Some(EntityId::Wall(id))),
                        // Handle drags are driven by the host transformer;
                        // selection stays as it is.
                        PointerTarget::Handle(_) => {}
                    }
                }
            }
            PointerEvent::Move { position } => {
                let world = self.camera.screen_to_world(position);
                self.draw.pointer_move(world);
            }
            PointerEvent::Up { .. } => {
                if let Some(entity) = self.draw.pointer_up(&self.plan.tables, &self.plan.walls)
                {
                    match entity {
                        NewEntity::Table(table) => self.plan.tables.push(table),
                        NewEntity::Wall(wall) => self.plan.walls.push(wall),
                    }
                }
            }
        }
    }

    /// Resolve what lies under a world point: the topmost table first,
    /// then any wall within tolerance, else empty canvas.
    pub fn hit_test(&self, world: Point) -> PointerTarget {
        if let Some(table) = self.plan.tables.iter().rev().find(|t| t.contains(world)) {
            return PointerTarget::Table(table.id);
        }
        if let Some(wall) = self
            .plan
            .walls
            .iter()
            .rev()
            .find(|w| point_near_wall(world, w, WALL_HIT_TOLERANCE))
        {
            return PointerTarget::Wall(wall.id.clone());
        }
        PointerTarget::Empty
    }

    /// Replace the selection. Selecting `None` clears it.
    pub fn select(&mut self, id: Option<EntityId>) {
        // Only live ids are selectable.
        let id = id.filter(|id| match id {
            EntityId::Table(tid) => self.plan.table(*tid).is_some(),
            EntityId::Wall(wid) => self.plan.wall(wid).is_some(),
        });
        self.selection.set(id);
    }

    /// Manipulation handles for the selected entity, if any. Locked
    /// tables yield `None` — the transformer detaches from them.
    pub fn selected_handles(&self) -> Option<Vec<Handle>> {
        match self.selection.selected()? {
            EntityId::Table(id) => selection::table_handles(self.plan.table(*id)?),
            EntityId::Wall(id) => Some(selection::wall_handles(self.plan.wall(id)?)),
        }
    }

    /// Delete the selected entity from whichever collection holds it and
    /// clear the selection. Deleting with nothing selected is a no-op.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selection.selected().cloned() else {
            return;
        };
        match &id {
            EntityId::Table(tid) => self.plan.tables.retain(|t| t.id != *tid),
            EntityId::Wall(wid) => self.plan.walls.retain(|w| w.id != *wid),
        }
        debug!("deleted {id:?}");
        self.selection.clear();
    }

    /// Commit a drag-move of a table. Unknown ids are a no-op; locked
    /// tables move only under [`LockPolicy::MoveAllowed`].
    pub fn commit_table_drag(&mut self, id: TableId, x: f64, y: f64) {
        let policy = self.lock_policy;
        if let Some(table) = self.plan.table_mut(id) {
            if selection::can_move(table, policy) {
                selection::apply_drag_end(table, x, y);
            }
        }
    }

    /// Commit a resize/rotate of a table. See
    /// [`selection::apply_transform_end`] for the atomic minimum-size
    /// rule. Unknown or locked tables are rejected outright.
    pub fn commit_table_transform(
        &mut self,
        id: TableId,
        x: f64,
        y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation_deg: f64,
    ) -> TransformOutcome {
        match self.plan.table_mut(id) {
            Some(table) if !table.locked => {
                selection::apply_transform_end(table, x, y, scale_x, scale_y, rotation_deg)
            }
            _ => TransformOutcome::Rejected,
        }
    }

    /// Toggle the lock flag on the selected table. No-op when the
    /// selection is empty or a wall.
    pub fn toggle_lock_selected(&mut self) {
        if let Some(EntityId::Table(id)) = self.selection.selected().cloned() {
            if let Some(table) = self.plan.table_mut(id) {
                selection::toggle_lock(table);
            }
        }
    }

    /// Drag one endpoint of a wall to a new world position, snapping to
    /// other walls' endpoints. Returns the active snap so the host can
    /// show the indicator; `None` means the raw position was used (or the
    /// wall no longer exists).
    pub fn drag_wall_endpoint(
        &mut self,
        id: &WallId,
        which: WallEndpoint,
        new_pos: Point,
    ) -> Option<SnapHit> {
        let Some(wall) = self.plan.wall(id) else {
            return None;
        };
        let (points, snap) = snap::update_wall_endpoint(
            wall,
            which,
            new_pos,
            &self.plan.walls,
            snap::DEFAULT_SNAP_THRESHOLD,
        );
        if let Some(wall) = self.plan.wall_mut(id) {
            wall.points = points;
        }
        snap
    }

    /// Replace both collections atomically with an imported document.
    /// The selection and any gesture in progress are cleared.
    pub fn import(&mut self, plan: FloorPlan) -> Result<(), ImportError> {
        plan.validate()?;
        debug!(
            "imported plan: {} tables, {} walls",
            plan.tables.len(),
            plan.walls.len()
        );
        self.plan = plan;
        self.selection.clear();
        self.draw.cancel();
        Ok(())
    }

    /// Append `count` pre-positioned tables on a square-ish grid
    /// (`cols = ceil(sqrt(count))`). Ids continue the max+1 sequence.
    pub fn add_tables(&mut self, count: usize, config: &BulkAddConfig) {
        for i in 0..count {
            let id = next_table_id(&self.plan.tables);
            let pos = grid_position(i, count, config.origin, config.spacing);
            let mut table = Table::new(id, pos.x, pos.y, config.width, config.height);
            table.capacity = config.capacity;
            self.plan.tables.push(table);
        }
        debug!("bulk-added {count} tables");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn seeded_editor() -> Editor {
        let mut editor = Editor::new();
        editor.plan.tables.push(Table::new(TableId(1), 0.0, 0.0, 60.0, 60.0));
        editor
            .plan
            .walls
            .push(Wall::new(WallId("line-1".into()), [200.0, 0.0, 300.0, 0.0]));
        editor
    }

    #[test]
    fn test_draw_routing_creates_table() {
        let mut editor = Editor::new();
        editor.draw.toggle_table_mode();
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            target: PointerTarget::Empty,
        });
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(110.0, 90.0),
        });
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(110.0, 90.0),
        });
        assert_eq!(editor.tables().len(), 1);
        assert_eq!(editor.tables()[0].id, TableId(1));
    }

    #[test]
    fn test_draw_uses_world_coordinates() {
        let mut editor = Editor::new();
        editor.camera.scale = 2.0;
        editor.camera.offset = Vec2::new(100.0, 0.0);
        editor.draw.toggle_table_mode();
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(100.0, 0.0),
            target: PointerTarget::Empty,
        });
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(200.0, 100.0),
        });
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(200.0, 100.0),
        });
        let table = &editor.tables()[0];
        assert_eq!((table.x, table.y), (0.0, 0.0));
        assert_eq!((table.width, table.height), (50.0, 50.0));
    }

    #[test]
    fn test_click_selects_and_empty_clears() {
        let mut editor = seeded_editor();
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(30.0, 30.0),
            target: PointerTarget::Table(TableId(1)),
        });
        assert_eq!(editor.selected(), Some(&EntityId::Table(TableId(1))));

        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(500.0, 500.0),
            target: PointerTarget::Empty,
        });
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_select_stale_id_is_noop() {
        let mut editor = seeded_editor();
        editor.select(Some(EntityId::Table(TableId(99))));
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_hit_test() {
        let editor = seeded_editor();
        assert_eq!(
            editor.hit_test(Point::new(30.0, 30.0)),
            PointerTarget::Table(TableId(1))
        );
        assert_eq!(
            editor.hit_test(Point::new(250.0, 3.0)),
            PointerTarget::Wall(WallId("line-1".into()))
        );
        assert_eq!(editor.hit_test(Point::new(500.0, 500.0)), PointerTarget::Empty);
    }

    #[test]
    fn test_delete_selected_table() {
        let mut editor = seeded_editor();
        editor.select(Some(EntityId::Table(TableId(1))));
        editor.delete_selected();
        assert!(editor.tables().is_empty());
        assert_eq!(editor.walls().len(), 1);
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_delete_selected_wall() {
        let mut editor = seeded_editor();
        editor.select(Some(EntityId::Wall(WallId("line-1".into()))));
        editor.delete_selected();
        assert!(editor.walls().is_empty());
        assert_eq!(editor.tables().len(), 1);
    }

    #[test]
    fn test_commit_drag_respects_lock_policy() {
        let mut editor = seeded_editor();
        editor.plan.table_mut(TableId(1)).unwrap().locked = true;

        editor.lock_policy = LockPolicy::MoveAllowed;
        editor.commit_table_drag(TableId(1), 50.0, 50.0);
        assert_eq!(editor.plan.table(TableId(1)).unwrap().x, 50.0);

        editor.lock_policy = LockPolicy::FullyFrozen;
        editor.commit_table_drag(TableId(1), 99.0, 99.0);
        assert_eq!(editor.plan.table(TableId(1)).unwrap().x, 50.0);
    }

    #[test]
    fn test_commit_transform_on_locked_table_rejected() {
        let mut editor = seeded_editor();
        editor.plan.table_mut(TableId(1)).unwrap().locked = true;
        let outcome = editor.commit_table_transform(TableId(1), 0.0, 0.0, 2.0, 2.0, 0.0);
        assert_eq!(outcome, TransformOutcome::Rejected);
        assert_eq!(editor.plan.table(TableId(1)).unwrap().width, 60.0);
    }

    #[test]
    fn test_commit_on_missing_id_is_noop() {
        let mut editor = seeded_editor();
        editor.commit_table_drag(TableId(42), 1.0, 1.0);
        let outcome = editor.commit_table_transform(TableId(42), 0.0, 0.0, 1.0, 1.0, 0.0);
        assert_eq!(outcome, TransformOutcome::Rejected);
    }

    #[test]
    fn test_drag_wall_endpoint_snaps() {
        let mut editor = seeded_editor();
        editor.plan.walls.push(Wall::new(
            WallId("line-2".into()),
            [400.0, 100.0, 500.0, 100.0],
        ));
        let id = WallId("line-2".into());
        let snap = editor.drag_wall_endpoint(&id, WallEndpoint::Start, Point::new(298.0, 2.0));
        assert!(snap.is_some());
        assert_eq!(
            editor.plan.wall(&id).unwrap().points,
            [300.0, 0.0, 500.0, 100.0]
        );
    }

    #[test]
    fn test_import_replaces_and_clears() {
        let mut editor = seeded_editor();
        editor.select(Some(EntityId::Table(TableId(1))));
        editor.draw.toggle_wall_mode();
        editor.draw.pointer_down(Point::ZERO, false, &[]);

        let mut plan = FloorPlan::new();
        plan.tables.push(Table::new(TableId(7), 0.0, 0.0, 80.0, 80.0));
        editor.import(plan).unwrap();

        assert_eq!(editor.tables().len(), 1);
        assert_eq!(editor.tables()[0].id, TableId(7));
        assert!(editor.walls().is_empty());
        assert!(editor.selected().is_none());
        assert!(!editor.draw.is_drawing());
    }

    #[test]
    fn test_import_rejects_non_finite_wall() {
        let mut plan = FloorPlan::new();
        plan.walls.push(Wall::new(
            WallId("bad".into()),
            [0.0, 0.0, f64::INFINITY, 0.0],
        ));
        let mut editor = Editor::new();
        assert!(matches!(
            editor.import(plan),
            Err(ImportError::NonFiniteWall(_))
        ));
        assert!(editor.walls().is_empty());
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut plan = FloorPlan::new();
        plan.tables.push(Table::new(TableId(1), 0.0, 0.0, 60.0, 60.0));
        plan.tables.push(Table::new(TableId(1), 50.0, 0.0, 60.0, 60.0));
        assert!(matches!(
            plan.validate(),
            Err(ImportError::DuplicateTableId(TableId(1)))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut plan = FloorPlan::new();
        plan.tables.push(Table::new(TableId(1), 10.0, 20.0, 120.0, 80.0));
        plan.walls
            .push(Wall::new(WallId("line-5".into()), [0.0, 0.0, 50.0, 0.0]));
        let json = plan.to_json().unwrap();
        assert!(json.contains("\"lines\""));
        let back = FloorPlan::from_json(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_bulk_add_grid() {
        let mut editor = Editor::new();
        editor.add_tables(5, &BulkAddConfig::default());
        assert_eq!(editor.tables().len(), 5);

        // Sequential ids from 1.
        let ids: Vec<u32> = editor.tables().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        // 5 tables on a 3-column grid: the fourth wraps to row 1.
        assert_eq!(editor.tables()[0].x, 100.0);
        assert_eq!(editor.tables()[2].x, 100.0 + 2.0 * 160.0);
        assert_eq!(editor.tables()[3].x, 100.0);
        assert_eq!(editor.tables()[3].y, 260.0);
    }

    #[test]
    fn test_scroll_zooms_camera() {
        let mut editor = Editor::new();
        editor.handle_pointer_event(PointerEvent::Scroll {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, -10.0),
            ctrl_held: false,
        });
        assert!(editor.camera.scale > 1.0);
    }
}
