//! Persistence collaborator error types

/// Errors reported by the persistence collaborator.
///
/// A store failure never rolls back the optimistic local state; it is
/// surfaced so the surrounding application can reconcile.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected the mutation.
    #[error("Store rejected the mutation: {message}")]
    Rejected { message: String },

    /// The backend could not be reached.
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
