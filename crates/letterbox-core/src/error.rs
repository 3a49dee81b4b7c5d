//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No wizard session exists for the identifier.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// A catalog lookup found no entry for the identifier.
    #[error("{catalog} catalog has no entry {id:?}")]
    CatalogEntryNotFound {
        /// The catalog that was searched (e.g. `"cover"`).
        catalog: &'static str,
        /// The identifier that was requested.
        id: String,
    },

    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// A request the domain refuses to carry out.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
