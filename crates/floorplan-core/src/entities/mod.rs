//! Entity model: tables and walls.

pub mod table;
pub mod wall;

pub use table::{next_table_id, table_label, Table, TableId};
pub use wall::{Wall, WallEndpoint, WallId};

use serde::{Deserialize, Serialize};

/// Identity of a selectable entity, drawn from either collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Table(TableId),
    Wall(WallId),
}

impl From<TableId> for EntityId {
    fn from(id: TableId) -> Self {
        EntityId::Table(id)
    }
}

impl From<WallId> for EntityId {
    fn from(id: WallId) -> Self {
        EntityId::Wall(id)
    }
}
