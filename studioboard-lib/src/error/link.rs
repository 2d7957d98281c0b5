//! Link synchronization error types

use uuid::Uuid;

use super::ValidationError;

/// Errors raised while synchronizing a linked cell with its entity.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LinkError {
    /// The anchor email matches no known user or temp user.
    #[error("No user or temp user with email '{email}'")]
    UnknownUser { email: String },

    /// The anchor id matches no known participant.
    #[error("No participant with id {id}")]
    UnknownParticipant { id: Uuid },

    /// The row index is outside the table's row range.
    #[error("Row {row} out of range (table has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// The edited text failed validation before the write.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
