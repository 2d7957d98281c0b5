//! Table entity

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ColumnKind;
use super::TableColumn;

/// A named table inside a table group.
///
/// Rows are virtual: a row is the tuple of values at a shared index across
/// all columns, so row count only changes by whole-table append/delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// The unique identifier of the table.
    pub id: Uuid,

    /// The group this table belongs to.
    pub group_id: Uuid,

    /// Display name.
    pub name: String,

    /// Position within the group, dense in `0..n`.
    pub order: u32,

    /// Columns, kept sorted by `order`.
    pub columns: Vec<TableColumn>,

    /// Not yet confirmed by the persistence layer.
    #[serde(default)]
    pub temporary: bool,
}

impl Table {
    /// Creates a new temporary table with no columns.
    pub fn new(group_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            name: name.into(),
            order: 0,
            columns: Vec::new(),
            temporary: true,
        }
    }

    /// Returns the column with the given id, if present.
    pub fn column(&self, id: Uuid) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Returns a mutable reference to the column with the given id.
    pub fn column_mut(&mut self, id: Uuid) -> Option<&mut TableColumn> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Returns the number of logical rows (all columns share it).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, TableColumn::row_count)
    }

    /// Returns `true` if every column's parallel arrays have the same length.
    pub fn is_consistent(&self) -> bool {
        let rows = self.row_count();
        self.columns
            .iter()
            .all(|c| c.values.len() == rows && c.links.len() == rows)
    }

    /// Appends a new column at the end, sized to the current row count.
    pub fn push_column(&mut self, header: impl Into<String>, kind: ColumnKind) -> Uuid {
        let mut column = TableColumn::new(self.id, header, kind, self.row_count());
        column.order = self.columns.len() as u32;
        let id = column.id;
        self.columns.push(column);
        id
    }

    /// Removes the column with the given id and renumbers the survivors.
    ///
    /// Returns `true` if a column was removed.
    pub fn remove_column(&mut self, id: Uuid) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.id != id);
        if self.columns.len() == before {
            return false;
        }
        self.renumber_columns();
        true
    }

    /// Appends a blank row to every column.
    pub fn append_row(&mut self) {
        for column in &mut self.columns {
            column.push_row();
        }
    }

    /// Removes the row at `index` from every column.
    pub fn remove_row(&mut self, index: usize) {
        for column in &mut self.columns {
            column.remove_row(index);
        }
    }

    /// Rewrites column `order` values to a dense `0..n`.
    pub fn renumber_columns(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.order = i as u32;
        }
    }

    /// Swaps in the persisted id (propagated to columns) and clears the
    /// temporary flag.
    pub fn confirm(&mut self, id: Uuid) {
        self.id = id;
        self.temporary = false;
        for column in &mut self.columns {
            column.table_id = id;
        }
    }
}
