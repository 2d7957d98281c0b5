//! Table group entity

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Table;

/// A named collection of tables, the top-level organizational unit.
///
/// A group owns its tables: deleting the group deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGroup {
    /// The unique identifier of the group.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Position within the board, dense in `0..n`.
    pub order: u32,

    /// Tables, kept sorted by `order`.
    pub tables: Vec<Table>,

    /// Not yet confirmed by the persistence layer.
    #[serde(default)]
    pub temporary: bool,

    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl TableGroup {
    /// Creates a new temporary group with no tables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            order: 0,
            tables: Vec::new(),
            temporary: true,
            created_at: Utc::now(),
        }
    }

    /// Returns the table with the given id, if present.
    pub fn table(&self, id: Uuid) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Returns a mutable reference to the table with the given id.
    pub fn table_mut(&mut self, id: Uuid) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    /// Appends a new temporary table at the end.
    pub fn push_table(&mut self, name: impl Into<String>) -> Uuid {
        let mut table = Table::new(self.id, name);
        table.order = self.tables.len() as u32;
        let id = table.id;
        self.tables.push(table);
        id
    }

    /// Removes the table with the given id and renumbers the survivors.
    ///
    /// Returns `true` if a table was removed.
    pub fn remove_table(&mut self, id: Uuid) -> bool {
        let before = self.tables.len();
        self.tables.retain(|t| t.id != id);
        if self.tables.len() == before {
            return false;
        }
        self.renumber_tables();
        true
    }

    /// Rewrites table `order` values to a dense `0..n`.
    pub fn renumber_tables(&mut self) {
        for (i, table) in self.tables.iter_mut().enumerate() {
            table.order = i as u32;
        }
    }

    /// Swaps in the persisted id (propagated to tables) and clears the
    /// temporary flag.
    pub fn confirm(&mut self, id: Uuid) {
        self.id = id;
        self.temporary = false;
        for table in &mut self.tables {
            table.group_id = id;
        }
    }
}
