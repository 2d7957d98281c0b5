//! Choice and color registry for choice columns
//!
//! Choice integrity after every operation: each non-blank cell value appears
//! in `choices`, and color entries reference only values present there.

use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::ChoiceColor;
use crate::model::ColumnKind;
use crate::model::TableColumn;

/// Default `(text, background)` color pairs, cycled as choices are added.
pub const DEFAULT_PALETTE: &[(&str, &str)] = &[
    ("#1b5e20", "#e8f5e9"),
    ("#0d47a1", "#e3f2fd"),
    ("#4a148c", "#f3e5f5"),
    ("#b71c1c", "#ffebee"),
    ("#e65100", "#fff3e0"),
    ("#004d40", "#e0f2f1"),
    ("#880e4f", "#fce4ec"),
    ("#3e2723", "#efebe9"),
];

fn require_choice_column(column: &TableColumn) -> Result<(), ValidationError> {
    if column.kind != ColumnKind::Choice {
        return Err(ValidationError::NotAChoiceColumn {
            header: column.header.clone(),
        });
    }
    Ok(())
}

/// Appends a new choice with a palette or custom color.
///
/// Rejected if the choice string already exists on the column.
pub fn add_choice(
    column: &TableColumn,
    value: &str,
    color: Option<(&str, &str)>,
) -> Result<TableColumn, ValidationError> {
    require_choice_column(column)?;
    if column.choices.iter().any(|c| c == value) {
        return Err(ValidationError::duplicate_choice(value));
    }

    let (text_color, bg_color) =
        color.unwrap_or(DEFAULT_PALETTE[column.choices.len() % DEFAULT_PALETTE.len()]);
    let mut out = column.clone();
    out.choices.push(value.to_string());
    out.colors.push(ChoiceColor::new(value, text_color, bg_color));
    Ok(out)
}

/// Renames the choice owning the given color id, rewriting every cell whose
/// value equals the old choice string.
pub fn rename_choice(
    column: &TableColumn,
    color_id: Uuid,
    new_value: &str,
) -> Result<TableColumn, ValidationError> {
    require_choice_column(column)?;
    let entry = column
        .colors
        .iter()
        .find(|c| c.id == color_id)
        .ok_or(ValidationError::UnknownChoice { id: color_id })?;
    let old_value = entry.value.clone();
    if new_value == old_value {
        return Ok(column.clone());
    }
    if column.choices.iter().any(|c| c == new_value) {
        return Err(ValidationError::duplicate_choice(new_value));
    }

    let mut out = column.clone();
    for choice in &mut out.choices {
        if *choice == old_value {
            *choice = new_value.to_string();
        }
    }
    for color in &mut out.colors {
        if color.id == color_id {
            color.value = new_value.to_string();
        }
    }
    for cell in &mut out.values {
        if *cell == old_value {
            *cell = new_value.to_string();
        }
    }
    Ok(out)
}

/// Deletes the choice owning the given color id, blanking every cell whose
/// value equals the deleted choice string.
pub fn delete_choice(column: &TableColumn, color_id: Uuid) -> Result<TableColumn, ValidationError> {
    require_choice_column(column)?;
    let entry = column
        .colors
        .iter()
        .find(|c| c.id == color_id)
        .ok_or(ValidationError::UnknownChoice { id: color_id })?;
    let value = entry.value.clone();

    let mut out = column.clone();
    out.choices.retain(|c| *c != value);
    out.colors.retain(|c| c.id != color_id);
    for cell in &mut out.values {
        if *cell == value {
            cell.clear();
        }
    }
    Ok(out)
}

/// Returns `true` if the column satisfies choice integrity: non-blank cells
/// appear in `choices` and colors reference only present choices.
pub fn choices_consistent(column: &TableColumn) -> bool {
    column
        .values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .all(|v| column.choices.contains(v))
        && column
            .colors
            .iter()
            .all(|c| column.choices.contains(&c.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_column() -> TableColumn {
        let column = TableColumn::new(Uuid::new_v4(), "Status", ColumnKind::Choice, 3);
        let column = add_choice(&column, "Red", None).unwrap();
        let mut column = add_choice(&column, "Blue", None).unwrap();
        column.values = vec!["Red".into(), "Blue".into(), "Red".into()];
        column
    }

    #[test]
    fn test_add_choice_rejects_duplicates_and_cycles_palette() {
        let column = choice_column();
        assert!(matches!(
            add_choice(&column, "Red", None),
            Err(ValidationError::DuplicateChoice { .. })
        ));

        let column = add_choice(&column, "Green", None).unwrap();
        assert_eq!(column.colors[2].bg_color, DEFAULT_PALETTE[2].1);
        assert!(choices_consistent(&column));
    }

    #[test]
    fn test_add_choice_accepts_custom_color() {
        let column = choice_column();
        let column = add_choice(&column, "Gold", Some(("#000000", "#ffd700"))).unwrap();
        let entry = column.colors.last().unwrap();
        assert_eq!(entry.text_color, "#000000");
        assert_eq!(entry.bg_color, "#ffd700");
    }

    #[test]
    fn test_rename_rewrites_matching_cells_only() {
        let column = choice_column();
        let red_id = column.colors[0].id;

        let renamed = rename_choice(&column, red_id, "Scarlet").unwrap();
        assert_eq!(renamed.values, vec!["Scarlet", "Blue", "Scarlet"]);
        assert_eq!(renamed.choices, vec!["Scarlet", "Blue"]);
        assert_eq!(renamed.colors[0].value, "Scarlet");
        assert!(choices_consistent(&renamed));
    }

    #[test]
    fn test_rename_rejects_collision_with_existing_choice() {
        let column = choice_column();
        let red_id = column.colors[0].id;
        assert!(matches!(
            rename_choice(&column, red_id, "Blue"),
            Err(ValidationError::DuplicateChoice { .. })
        ));
    }

    #[test]
    fn test_delete_blanks_matching_cells() {
        let column = choice_column();
        let red_id = column.colors[0].id;

        let deleted = delete_choice(&column, red_id).unwrap();
        assert_eq!(deleted.values, vec!["", "Blue", ""]);
        assert_eq!(deleted.choices, vec!["Blue"]);
        assert_eq!(deleted.colors.len(), 1);
        assert!(choices_consistent(&deleted));
    }

    #[test]
    fn test_operations_require_choice_kind() {
        let column = TableColumn::new(Uuid::new_v4(), "Notes", ColumnKind::Value, 0);
        assert!(matches!(
            add_choice(&column, "Red", None),
            Err(ValidationError::NotAChoiceColumn { .. })
        ));
        assert!(matches!(
            delete_choice(&column, Uuid::new_v4()),
            Err(ValidationError::NotAChoiceColumn { .. })
        ));
    }

    #[test]
    fn test_unknown_choice_id_is_rejected() {
        let column = choice_column();
        assert!(matches!(
            rename_choice(&column, Uuid::new_v4(), "Teal"),
            Err(ValidationError::UnknownChoice { .. })
        ));
    }
}
