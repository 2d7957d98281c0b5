//! Row re-projection
//!
//! Given the new desired order of one column's non-blank values, computes a
//! single row permutation and applies it to every column's parallel arrays,
//! preserving row identity end to end. Blank rows keep their relative order
//! and move to the end.

use uuid::Uuid;

use crate::model::Table;
use crate::model::TableColumn;

/// Re-projects every column of `table` to the row order implied by
/// `new_order`, the sorted non-blank values of the column `column_id`.
///
/// Duplicate values are resolved by scanning forward and skipping indices
/// already claimed, so equal values keep their original relative order.
///
/// Returns `None` without touching anything when the permutation cannot be
/// derived: a value missing from `new_order`, a count mismatch, or columns
/// whose parallel arrays disagree. Callers treat `None` as "no change
/// applied".
pub fn reproject(table: &Table, column_id: Uuid, new_order: &[String]) -> Option<Vec<TableColumn>> {
    let column = table.column(column_id)?;
    if !table.is_consistent() {
        return None;
    }
    let rows = column.row_count();

    let mut claimed = vec![false; new_order.len()];
    let mut new_index: Vec<Option<usize>> = vec![None; rows];
    let mut mapped = 0usize;

    for i in 0..rows {
        let value = &column.values[i];
        if value.trim().is_empty() {
            continue;
        }
        let slot = new_order
            .iter()
            .enumerate()
            .position(|(j, candidate)| !claimed[j] && candidate == value)?;
        claimed[slot] = true;
        new_index[i] = Some(slot);
        mapped += 1;
    }

    // Every sorted value must have been claimed by exactly one row.
    if mapped != new_order.len() {
        return None;
    }

    // Blank rows follow the mapped ones, keeping their relative order.
    let mut next = mapped;
    let new_index: Vec<usize> = new_index
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                let assigned = next;
                next += 1;
                assigned
            })
        })
        .collect();

    let columns = table
        .columns
        .iter()
        .map(|column| {
            let mut out = column.clone();
            out.values = vec![String::new(); rows];
            out.links = vec![None; rows];
            for (i, &target) in new_index.iter().enumerate() {
                out.values[target] = column.values[i].clone();
                out.links[target] = column.links[i].clone();
            }
            out
        })
        .collect();
    Some(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::model::ColumnKind;

    fn table_with_columns(columns: &[(&str, &[&str])]) -> Table {
        let mut table = Table::new(Uuid::new_v4(), "t");
        for (header, values) in columns {
            let id = table.push_column(*header, ColumnKind::Value);
            for _ in 0..values.len().saturating_sub(table.row_count()) {
                table.append_row();
            }
            let column = table.column_mut(id).unwrap();
            column.values = values.iter().map(|v| v.to_string()).collect();
        }
        table
    }

    fn row_tuples(columns: &[TableColumn]) -> BTreeSet<Vec<String>> {
        let rows = columns[0].values.len();
        (0..rows)
            .map(|i| columns.iter().map(|c| c.values[i].clone()).collect())
            .collect()
    }

    #[test]
    fn test_reproject_preserves_row_identity_and_moves_blanks_last() {
        let table = table_with_columns(&[
            ("name", &["carol", "", "alice"]),
            ("city", &["lyon", "oslo", "bern"]),
        ]);
        let sorted = vec!["alice".to_string(), "carol".to_string()];

        let columns = reproject(&table, table.columns[0].id, &sorted).unwrap();
        assert_eq!(columns[0].values, vec!["alice", "carol", ""]);
        assert_eq!(columns[1].values, vec!["bern", "lyon", "oslo"]);
        assert_eq!(row_tuples(&columns), row_tuples(&table.columns));
    }

    #[test]
    fn test_reproject_is_stable_under_duplicates() {
        let table = table_with_columns(&[
            ("name", &["kim", "kim", "ann"]),
            ("seq", &["1", "2", "3"]),
        ]);
        let sorted = vec!["ann".to_string(), "kim".to_string(), "kim".to_string()];

        let columns = reproject(&table, table.columns[0].id, &sorted).unwrap();
        // The two "kim" rows keep their original relative order.
        assert_eq!(columns[1].values, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_reproject_aborts_on_missing_value() {
        let table = table_with_columns(&[("name", &["carol", "alice"])]);
        let sorted = vec!["alice".to_string(), "someone-else".to_string()];
        assert!(reproject(&table, table.columns[0].id, &sorted).is_none());
    }

    #[test]
    fn test_reproject_aborts_on_count_mismatch() {
        let table = table_with_columns(&[("name", &["carol", "alice"])]);
        let sorted = vec![
            "alice".to_string(),
            "carol".to_string(),
            "carol".to_string(),
        ];
        assert!(reproject(&table, table.columns[0].id, &sorted).is_none());
    }

    #[test]
    fn test_reproject_carries_links_with_their_rows() {
        use crate::model::LinkAnchor;
        use crate::model::UserField;

        let mut table = table_with_columns(&[("email", &["z@x.com", "a@x.com"])]);
        table.columns[0].links[0] = Some(LinkAnchor::user("z@x.com", UserField::Email));
        let sorted = vec!["a@x.com".to_string(), "z@x.com".to_string()];

        let columns = reproject(&table, table.columns[0].id, &sorted).unwrap();
        assert!(columns[0].links[0].is_none());
        assert_eq!(
            columns[0].links[1],
            Some(LinkAnchor::user("z@x.com", UserField::Email))
        );
    }
}
