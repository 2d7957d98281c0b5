//! Anchor string parse errors

/// Error parsing a persisted anchor string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseAnchorError {
    /// The string carries neither known entity prefix.
    #[error("Unrecognized anchor prefix in '{text}'")]
    UnknownPrefix { text: String },

    /// The entity part is present but the field part is missing.
    #[error("Anchor '{text}' is missing a field name")]
    MissingField { text: String },

    /// The field name is not a known semantic field.
    #[error("Unknown anchor field '{field}'")]
    UnknownField { field: String },

    /// The participant id is not a valid UUID.
    #[error("Invalid participant id '{id}'")]
    InvalidId { id: String },
}
