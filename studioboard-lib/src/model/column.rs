//! Table column and choice color types

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::LinkAnchor;

/// The kind of data a column holds.
///
/// The kind drives comparator selection when sorting and field assignment
/// when linking rows to domain entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Free-form text.
    Value,
    /// A user display cell.
    User,
    /// Comma-separated timeslot ids.
    Date,
    /// One of the column's enumerated choices.
    Choice,
    /// Comma-separated tag ids.
    Tag,
    /// A storage path to an uploaded file.
    File,
    /// Comma-separated notification ids.
    Notification,
}

/// Display color for a choice value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceColor {
    /// The unique identifier of the color entry.
    pub id: Uuid,
    /// The choice value this color applies to.
    pub value: String,
    /// Foreground color (hex code).
    pub text_color: String,
    /// Background color (hex code).
    pub bg_color: String,
}

impl ChoiceColor {
    /// Creates a new color entry for a choice value.
    pub fn new(
        value: impl Into<String>,
        text_color: impl Into<String>,
        bg_color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: value.into(),
            text_color: text_color.into(),
            bg_color: bg_color.into(),
        }
    }
}

/// A typed, independently orderable series of per-row values within a table.
///
/// `values` and `links` are parallel arrays: index *i* in both denotes
/// logical row *i*, and every column of a table keeps them at the same
/// length. `links` is the per-row metadata slot binding a cell to a domain
/// entity field; `choices`/`colors` carry the enumerated options of a
/// choice column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    /// The unique identifier of the column.
    pub id: Uuid,

    /// The table this column belongs to.
    pub table_id: Uuid,

    /// Display name shown in the header cell.
    pub header: String,

    /// The column kind.
    pub kind: ColumnKind,

    /// Position within the table, dense in `0..n`.
    pub order: u32,

    /// One cell value per logical row.
    pub values: Vec<String>,

    /// Per-row entity binding, aligned index-for-index with `values`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Option<LinkAnchor>>,

    /// Selectable options (choice columns only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,

    /// Display colors for choice values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ChoiceColor>,

    /// Not yet confirmed by the persistence layer.
    #[serde(default)]
    pub temporary: bool,
}

impl TableColumn {
    /// Creates a new temporary column with `row_count` blank rows.
    pub fn new(
        table_id: Uuid,
        header: impl Into<String>,
        kind: ColumnKind,
        row_count: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id,
            header: header.into(),
            kind,
            order: 0,
            values: vec![String::new(); row_count],
            links: vec![None; row_count],
            choices: Vec::new(),
            colors: Vec::new(),
            temporary: true,
        }
    }

    /// Returns the number of logical rows.
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the cell value at `row`, if in range.
    pub fn value(&self, row: usize) -> Option<&str> {
        self.values.get(row).map(String::as_str)
    }

    /// Returns `true` if the cell at `row` is blank (empty or whitespace).
    pub fn is_blank(&self, row: usize) -> bool {
        self.value(row).is_none_or(|v| v.trim().is_empty())
    }

    /// Returns the anchor bound to `row`, if any.
    pub fn anchor(&self, row: usize) -> Option<&LinkAnchor> {
        self.links.get(row).and_then(Option::as_ref)
    }

    /// Appends a blank row.
    pub fn push_row(&mut self) {
        self.values.push(String::new());
        self.links.push(None);
    }

    /// Removes the row at `index`. Out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) {
        if index < self.values.len() {
            self.values.remove(index);
            self.links.remove(index);
        }
    }

    /// Swaps in the persisted id and clears the temporary flag.
    pub fn confirm(&mut self, id: Uuid) {
        self.id = id;
        self.temporary = false;
    }
}
