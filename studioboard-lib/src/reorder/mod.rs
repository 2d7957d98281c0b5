//! Multi-level drag reorder engine
//!
//! Computes replacement orderings for the four reorderable collections
//! (groups, tables, columns, rows) from a drag source, a drop target, and a
//! closest-edge signal. Every function is pure: it returns fully renumbered
//! replacement lists, or `None` when the drop cannot be resolved. State is
//! never partially renumbered.

use uuid::Uuid;

use crate::model::Board;
use crate::model::Table;
use crate::model::TableColumn;
use crate::model::TableGroup;

/// The side of the drop target nearest the pointer.
///
/// `Top`/`Bottom` come from vertical lists, `Left`/`Right` from horizontal
/// ones; both pairs collapse to an insert-before/insert-after decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosestEdge {
    /// Above the target (vertical lists).
    Top,
    /// Below the target (vertical lists).
    Bottom,
    /// Left of the target (horizontal lists).
    Left,
    /// Right of the target (horizontal lists).
    Right,
}

impl ClosestEdge {
    /// Returns `true` if the source lands after the target.
    pub fn is_trailing(self) -> bool {
        matches!(self, Self::Bottom | Self::Right)
    }
}

/// A dragged item, discriminated by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    /// A table group dragged within the board.
    Group {
        /// The dragged group.
        id: Uuid,
    },
    /// A table dragged within or across groups.
    Table {
        /// The dragged table.
        id: Uuid,
    },
    /// A column dragged within its table.
    Column {
        /// The dragged column.
        id: Uuid,
        /// The owning table.
        table_id: Uuid,
    },
    /// A virtual row dragged within its table.
    Row {
        /// The owning table.
        table_id: Uuid,
        /// The dragged row index.
        index: usize,
    },
}

/// Drop target for a dragged table: a sibling table or a whole group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDropTarget {
    /// Dropped onto another table; the edge decides the insert side.
    Table(Uuid),
    /// Dropped onto a group's container; the table is appended at the end.
    Group(Uuid),
}

/// The renumbered table lists produced by a table move.
///
/// `source_group` is present only for cross-group moves; both lists serve as
/// the optimistic replacement state and the persistence diff payload, one
/// store call per affected parent.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMove {
    /// The old parent's final table list, for cross-group moves.
    pub source_group: Option<(Uuid, Vec<Table>)>,
    /// The new parent's final table list.
    pub target_group: (Uuid, Vec<Table>),
}

trait Reorderable {
    fn item_id(&self) -> Uuid;
    fn set_order(&mut self, order: u32);
}

impl Reorderable for TableGroup {
    fn item_id(&self) -> Uuid {
        self.id
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Reorderable for Table {
    fn item_id(&self) -> Uuid {
        self.id
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Reorderable for TableColumn {
    fn item_id(&self) -> Uuid {
        self.id
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

fn renumber<T: Reorderable>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_order(i as u32);
    }
}

/// Moves `source` next to `target` within one collection and renumbers.
///
/// Returns `None` for a self-drop or when either id is unknown.
fn move_within<T: Reorderable + Clone>(
    items: &[T],
    source: Uuid,
    target: Uuid,
    trailing: bool,
) -> Option<Vec<T>> {
    if source == target {
        return None;
    }
    let source_index = items.iter().position(|i| i.item_id() == source)?;

    let mut out = items.to_vec();
    let moved = out.remove(source_index);
    let target_index = out.iter().position(|i| i.item_id() == target)?;
    out.insert(target_index + usize::from(trailing), moved);
    renumber(&mut out);
    Some(out)
}

/// Reorders the board's group list.
pub fn reorder_groups(
    groups: &[TableGroup],
    source: Uuid,
    target: Uuid,
    edge: ClosestEdge,
) -> Option<Vec<TableGroup>> {
    move_within(groups, source, target, edge.is_trailing())
}

/// Reorders a table's column list.
pub fn reorder_columns(
    table: &Table,
    source: Uuid,
    target: Uuid,
    edge: ClosestEdge,
) -> Option<Vec<TableColumn>> {
    move_within(&table.columns, source, target, edge.is_trailing())
}

/// Reorders tables within a group or moves one across groups.
pub fn reorder_tables(
    board: &Board,
    source: Uuid,
    target: TableDropTarget,
    edge: ClosestEdge,
) -> Option<TableMove> {
    let source_group = board.groups.iter().find(|g| g.table(source).is_some())?;

    let target_group = match target {
        TableDropTarget::Table(target_id) => {
            if target_id == source {
                return None;
            }
            board.groups.iter().find(|g| g.table(target_id).is_some())?
        }
        TableDropTarget::Group(group_id) => board.group(group_id)?,
    };

    if source_group.id == target_group.id {
        let tables = match target {
            TableDropTarget::Table(target_id) => move_within(
                &source_group.tables,
                source,
                target_id,
                edge.is_trailing(),
            )?,
            TableDropTarget::Group(_) => {
                let mut tables = source_group.tables.clone();
                let index = tables.iter().position(|t| t.id == source)?;
                let moved = tables.remove(index);
                tables.push(moved);
                renumber(&mut tables);
                tables
            }
        };
        return Some(TableMove {
            source_group: None,
            target_group: (source_group.id, tables),
        });
    }

    // Cross-group move: close the gap in the old parent, splice into the new
    // one, and repoint the moved table's parent reference.
    let mut old_tables = source_group.tables.clone();
    let index = old_tables.iter().position(|t| t.id == source)?;
    let mut moved = old_tables.remove(index);
    renumber(&mut old_tables);
    moved.group_id = target_group.id;

    let mut new_tables = target_group.tables.clone();
    let insert_at = match target {
        TableDropTarget::Table(target_id) => {
            let target_index = new_tables.iter().position(|t| t.id == target_id)?;
            target_index + usize::from(edge.is_trailing())
        }
        TableDropTarget::Group(_) => new_tables.len(),
    };
    new_tables.insert(insert_at, moved);
    renumber(&mut new_tables);

    Some(TableMove {
        source_group: Some((source_group.id, old_tables)),
        target_group: (target_group.id, new_tables),
    })
}

/// Moves one virtual row next to another, applying the permutation to every
/// column's parallel arrays.
pub fn reorder_rows(
    table: &Table,
    source: usize,
    target: usize,
    edge: ClosestEdge,
) -> Option<Vec<TableColumn>> {
    let rows = table.row_count();
    if source == target || source >= rows || target >= rows {
        return None;
    }

    let mut order: Vec<usize> = (0..rows).collect();
    order.remove(source);
    let target_index = order.iter().position(|&i| i == target)?;
    order.insert(target_index + usize::from(edge.is_trailing()), source);

    let columns = table
        .columns
        .iter()
        .map(|column| {
            let mut out = column.clone();
            out.values = order.iter().map(|&i| column.values[i].clone()).collect();
            out.links = order.iter().map(|&i| column.links[i].clone()).collect();
            out
        })
        .collect();
    Some(columns)
}
