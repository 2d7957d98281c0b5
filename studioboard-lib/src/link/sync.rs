//! Linked-cell synchronization

use uuid::Uuid;

use super::is_valid_email;
use crate::catalog::Catalogs;
use crate::catalog::Participant;
use crate::catalog::UserProfile;
use crate::error::LinkError;
use crate::error::ValidationError;
use crate::model::LinkAnchor;
use crate::model::ParticipantField;
use crate::model::TableColumn;
use crate::model::UserField;

/// The updated entity copy produced by a linked-cell write.
///
/// The caller persists it through the store and swaps it into its catalog
/// copy; the synchronizer itself never mutates shared state.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityUpdate {
    /// A user profile with the edited field applied.
    User(UserProfile),
    /// A participant with the edited field applied.
    Participant(Participant),
}

/// Applies a cell edit to the entity the column is bound to at `row`.
///
/// Returns `Ok(None)` when the cell carries no anchor (a plain edit) or the
/// anchor is the identity column itself. Validation failures and unknown
/// entities are errors: no mutation occurs and the caller surfaces them.
/// Re-applying the same text yields the same result.
pub fn sync_cell(
    column: &TableColumn,
    row: usize,
    text: &str,
    catalogs: &Catalogs,
) -> Result<Option<EntityUpdate>, LinkError> {
    let rows = column.row_count();
    if row >= rows {
        return Err(LinkError::RowOutOfRange { row, rows });
    }
    let Some(anchor) = column.anchor(row) else {
        return Ok(None);
    };

    match anchor {
        LinkAnchor::User { email, field } => {
            let user = catalogs
                .any_user_by_email(email)
                .ok_or_else(|| LinkError::UnknownUser {
                    email: email.clone(),
                })?;
            let mut updated = user.clone();
            match field {
                UserField::First => updated.first = text.trim().to_string(),
                UserField::Last => updated.last = text.trim().to_string(),
                UserField::Sitting => {
                    let sitting = text
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| ValidationError::sitting_not_numeric(text))?;
                    updated.sitting = Some(sitting);
                }
                // The anchor identity column: the displayed value changes,
                // the profile keeps its canonical email.
                UserField::Email => return Ok(None),
            }
            Ok(Some(EntityUpdate::User(updated)))
        }
        LinkAnchor::Participant { id, field } => {
            let participant = catalogs
                .participant_by_id(*id)
                .ok_or(LinkError::UnknownParticipant { id: *id })?;
            let mut updated = participant.clone();
            match field {
                ParticipantField::First => updated.first = text.trim().to_string(),
                ParticipantField::Last => updated.last = text.trim().to_string(),
                ParticipantField::Middle => updated.middle = text.trim().to_string(),
                ParticipantField::Preferred => updated.preferred = text.trim().to_string(),
                ParticipantField::Email => {
                    let email = text.trim();
                    if !is_valid_email(email) {
                        return Err(ValidationError::invalid_email(email).into());
                    }
                    updated.email = email.to_string();
                }
                ParticipantField::Tags => updated.tags = parse_id_list(text),
                ParticipantField::Timeslot => updated.timeslots = parse_id_list(text),
                ParticipantField::Notifications => updated.notifications = parse_id_list(text),
            }
            Ok(Some(EntityUpdate::Participant(updated)))
        }
    }
}

/// Removes the anchor at `row` without altering the displayed value.
///
/// Returns the replacement column, or `None` when there is nothing to
/// remove.
pub fn unlink(column: &TableColumn, row: usize) -> Option<TableColumn> {
    column.anchor(row)?;
    let mut out = column.clone();
    out.links[row] = None;
    Some(out)
}

fn parse_id_list(text: &str) -> Vec<Uuid> {
    text.split(',')
        .map(str::trim)
        .filter_map(|raw| Uuid::parse_str(raw).ok())
        .collect()
}
