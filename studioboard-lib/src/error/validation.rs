//! Validation error types

/// Input rejected before any mutation takes place.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// The text is not a syntactically valid email address.
    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    /// A sitting value must parse as a number.
    #[error("Sitting '{value}' is not numeric")]
    SittingNotNumeric { value: String },

    /// The choice value already exists on the column.
    #[error("Choice '{value}' already exists")]
    DuplicateChoice { value: String },

    /// The operation only applies to choice columns.
    #[error("Column '{header}' is not a choice column")]
    NotAChoiceColumn { header: String },

    /// No choice with the given id exists on the column.
    #[error("No choice with id {id} on this column")]
    UnknownChoice { id: uuid::Uuid },
}

impl ValidationError {
    /// Creates an invalid-email error.
    pub fn invalid_email(value: impl Into<String>) -> Self {
        Self::InvalidEmail {
            value: value.into(),
        }
    }

    /// Creates a non-numeric-sitting error.
    pub fn sitting_not_numeric(value: impl Into<String>) -> Self {
        Self::SittingNotNumeric {
            value: value.into(),
        }
    }

    /// Creates a duplicate-choice error.
    pub fn duplicate_choice(value: impl Into<String>) -> Self {
        Self::DuplicateChoice {
            value: value.into(),
        }
    }
}
