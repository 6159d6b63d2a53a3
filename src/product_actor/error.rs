use thiserror::Error;

use crate::domain::ProductId;
use crate::error::{ErrorKind, StoreError};

/// Errors from catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Product validation error: {0}")]
    Validation(String),
    #[error("Product storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
