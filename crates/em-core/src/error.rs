//! Shared error type.
//!
//! Sub-crates define their own error enums and either convert into `EmError`
//! or wrap it as one variant, whichever keeps error sites clean.

use thiserror::Error;

use crate::EntityId;

/// The top-level error type for `em-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EmError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `em-core`.
pub type EmResult<T> = Result<T, EmError>;
