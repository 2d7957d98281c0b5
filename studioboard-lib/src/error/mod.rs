//! Error types

mod anchor;
mod link;
mod store;
mod validation;

pub use anchor::*;
pub use link::*;
pub use store::*;
pub use validation::*;

/// Umbrella error for session-level operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Link synchronization failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The persistence collaborator reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A persisted anchor string could not be parsed.
    #[error(transparent)]
    Anchor(#[from] ParseAnchorError),
}
