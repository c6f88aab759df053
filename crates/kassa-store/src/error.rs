//! # Store Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  kassa-core error (CurrencyMismatch, Validation, ...)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds NotFound/Duplicate repository cases   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller surfaces a user-facing rejection; no partial state remains    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use kassa_core::CoreError;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - Looking up an id that was never inserted
    /// - Attaching a candidate item/policy id that doesn't resolve
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An entity with this id already exists.
    #[error("{entity} with id {id} already exists")]
    Duplicate { entity: &'static str, id: String },

    /// Domain error from kassa-core (currency mismatch, validation, ...).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<kassa_core::ValidationError> for StoreError {
    fn from(err: kassa_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
