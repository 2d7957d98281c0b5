//! Type-aware column value sorting

mod reproject;

pub use reproject::*;

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::catalog::Catalogs;
use crate::model::ColumnKind;
use crate::model::Table;
use crate::model::TableColumn;

/// Sort direction.
///
/// `Dsc` reverses the `Asc` result rather than using a distinct comparator,
/// so every comparator ends in a full-string tie-break: ties are only ever
/// between identical strings and reversal cannot reshuffle them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending (reverse of ascending).
    Dsc,
}

/// Produces a total order over a column's non-blank values.
///
/// The catalogs resolve tag ids to names and timeslot ids to start instants;
/// ids that resolve to nothing are ignored for comparison.
pub fn sort_column(
    column: &TableColumn,
    direction: SortDirection,
    catalogs: &Catalogs,
) -> Vec<String> {
    let mut values: Vec<String> = column
        .values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect();
    values.sort_by(|a, b| compare_values(column.kind, a, b, catalogs));
    if direction == SortDirection::Dsc {
        values.reverse();
    }
    values
}

/// Sorts a column and re-projects the whole table to the new row order.
///
/// Returns `None` when the re-projection cannot be applied; callers treat
/// that as "no change".
pub fn sort_table(
    table: &Table,
    column_id: Uuid,
    direction: SortDirection,
    catalogs: &Catalogs,
) -> Option<Vec<TableColumn>> {
    let column = table.column(column_id)?;
    let sorted = sort_column(column, direction, catalogs);
    reproject(table, column_id, &sorted)
}

fn compare_values(kind: ColumnKind, a: &str, b: &str, catalogs: &Catalogs) -> Ordering {
    match kind {
        ColumnKind::Tag => compare_tags(a, b, catalogs),
        ColumnKind::Date => compare_dates(a, b, catalogs),
        ColumnKind::File => compare_files(a, b),
        _ => a.cmp(b),
    }
}

fn split_ids(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn tag_names(cell: &str, catalogs: &Catalogs) -> Vec<String> {
    let mut names: Vec<String> = split_ids(cell)
        .map(|raw| {
            Uuid::parse_str(raw)
                .ok()
                .and_then(|id| catalogs.tag_name(id))
                .unwrap_or(raw)
                .to_string()
        })
        .collect();
    names.sort();
    names
}

/// More tags sort first; ties break on the alphabetized tag names compared
/// component-wise.
fn compare_tags(a: &str, b: &str, catalogs: &Catalogs) -> Ordering {
    let count_a = split_ids(a).count();
    let count_b = split_ids(b).count();
    count_b
        .cmp(&count_a)
        .then_with(|| tag_names(a, catalogs).cmp(&tag_names(b, catalogs)))
        .then_with(|| a.cmp(b))
}

fn slot_starts(cell: &str, catalogs: &Catalogs) -> Vec<DateTime<Utc>> {
    split_ids(cell)
        .filter_map(|raw| Uuid::parse_str(raw).ok())
        .filter_map(|id| catalogs.timeslot_start(id))
        .collect()
}

/// Compares by the earliest differing timeslot start; a cell that runs out
/// of entries before a difference is found sorts after one that has more.
fn compare_dates(a: &str, b: &str, catalogs: &Catalogs) -> Ordering {
    let starts_a = slot_starts(a, catalogs);
    let starts_b = slot_starts(b, catalogs);
    for (x, y) in starts_a.iter().zip(starts_b.iter()) {
        let ordering = x.cmp(y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    starts_b
        .len()
        .cmp(&starts_a.len())
        .then_with(|| a.cmp(b))
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Compares by the file's display name, not its full storage path.
fn compare_files(a: &str, b: &str) -> Ordering {
    basename(a).cmp(basename(b)).then_with(|| a.cmp(b))
}
