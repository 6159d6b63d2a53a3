//! Shared error vocabulary.
//!
//! Each domain has its own `thiserror` enum (see `*_actor::error` and the
//! ledgers); all of them map onto [`ErrorKind`] so the UI layer can branch
//! on the category while displaying the message as-is.

use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Coarse failure category shared by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: empty address, unknown payment method, zero quantity.
    Validation,
    /// A product, order, user or cart line id did not resolve.
    NotFound,
    /// Business rule rejected the change: stock too low, order not cancellable.
    Conflict,
    /// The backing store failed unexpectedly.
    Storage,
}

/// Failure of a storage capability (`ProductStore`, `CartStore`, ...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("store rejected request: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Rejected(_) => ErrorKind::Validation,
            Self::Unavailable(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn from_framework(entity: &'static str, err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound { entity, id },
            FrameworkError::Rejected(msg) => Self::Rejected(msg),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                Self::Unavailable(err.to_string())
            }
            FrameworkError::UnexpectedResult(msg) => Self::Unavailable(msg),
        }
    }
}
