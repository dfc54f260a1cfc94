//! Errors returned by [`TodoStore`](crate::TodoStore).

use entity_store_core::entity::LookupError;
use entity_store_runtime::{ConfigError, StoreError};
use thiserror::Error;

/// Errors from the todo store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo with the requested id; the store is unchanged
    #[error(transparent)]
    NotFound(#[from] LookupError),

    /// The store configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Effects kept dispatching past the configured depth
    #[error("Effect chain exceeded maximum depth of {max}")]
    EffectDepthExceeded {
        /// The configured maximum
        max: usize,
    },
}

impl From<StoreError<LookupError>> for TodoError {
    fn from(error: StoreError<LookupError>) -> Self {
        match error {
            StoreError::Rejected(lookup) => Self::NotFound(lookup),
            StoreError::EffectDepthExceeded { max } => Self::EffectDepthExceeded { max },
        }
    }
}
