use thiserror::Error;

use crate::domain::{EmailError, UserId};
use crate::error::{ErrorKind, StoreError};

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("User validation error: {0}")]
    Validation(String),
    #[error("User storage error: {0}")]
    Storage(#[from] StoreError),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::Conflict,
            Self::InvalidEmail(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
