//! Board aggregate owning the table-group collection

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Table;
use super::TableColumn;
use super::TableGroup;

/// The in-memory table-group collection.
///
/// All engine operations read from the board and produce replacement
/// collections; the board swaps them in wholesale (copy-on-write at the
/// collection level), so a read during a pending write always sees a
/// consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Groups, kept sorted by `order`.
    pub groups: Vec<TableGroup>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group with the given id, if present.
    pub fn group(&self, id: Uuid) -> Option<&TableGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Returns a mutable reference to the group with the given id.
    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut TableGroup> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Returns the table with the given id, searching every group.
    pub fn table(&self, id: Uuid) -> Option<&Table> {
        self.groups.iter().find_map(|g| g.table(id))
    }

    /// Returns a mutable reference to the table with the given id.
    pub fn table_mut(&mut self, id: Uuid) -> Option<&mut Table> {
        self.groups.iter_mut().find_map(|g| g.table_mut(id))
    }

    /// Returns the column with the given id within the given table.
    pub fn column(&self, table_id: Uuid, column_id: Uuid) -> Option<&TableColumn> {
        self.table(table_id).and_then(|t| t.column(column_id))
    }

    /// Appends a new temporary group at the end.
    pub fn push_group(&mut self, name: impl Into<String>) -> Uuid {
        let mut group = TableGroup::new(name);
        group.order = self.groups.len() as u32;
        let id = group.id;
        self.groups.push(group);
        id
    }

    /// Removes the group with the given id (and with it every table it
    /// owns) and renumbers the survivors.
    ///
    /// Returns `true` if a group was removed.
    pub fn remove_group(&mut self, id: Uuid) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        if self.groups.len() == before {
            return false;
        }
        self.renumber_groups();
        true
    }

    /// Rewrites group `order` values to a dense `0..n`.
    pub fn renumber_groups(&mut self) {
        for (i, group) in self.groups.iter_mut().enumerate() {
            group.order = i as u32;
        }
    }

    /// Replaces the whole group collection.
    pub fn set_groups(&mut self, groups: Vec<TableGroup>) {
        self.groups = groups;
    }

    /// Replaces a group's table collection wholesale.
    ///
    /// Returns `false` (leaving the board untouched) if the group is
    /// unknown.
    pub fn set_tables(&mut self, group_id: Uuid, tables: Vec<Table>) -> bool {
        match self.group_mut(group_id) {
            Some(group) => {
                group.tables = tables;
                true
            }
            None => false,
        }
    }

    /// Replaces a table's column collection wholesale.
    ///
    /// Returns `false` (leaving the board untouched) if the table is
    /// unknown.
    pub fn set_columns(&mut self, table_id: Uuid, columns: Vec<TableColumn>) -> bool {
        match self.table_mut(table_id) {
            Some(table) => {
                table.columns = columns;
                true
            }
            None => false,
        }
    }

    /// Swaps a temporary table id for its persisted id.
    ///
    /// Returns `true` if the table was found and confirmed.
    pub fn confirm_table(&mut self, temp_id: Uuid, persisted_id: Uuid) -> bool {
        match self.table_mut(temp_id) {
            Some(table) => {
                table.confirm(persisted_id);
                true
            }
            None => false,
        }
    }

    /// Swaps a temporary column id for its persisted id.
    ///
    /// Returns `true` if the column was found and confirmed.
    pub fn confirm_column(&mut self, table_id: Uuid, temp_id: Uuid, persisted_id: Uuid) -> bool {
        match self.table_mut(table_id).and_then(|t| t.column_mut(temp_id)) {
            Some(column) => {
                column.confirm(persisted_id);
                true
            }
            None => false,
        }
    }
}
