use thiserror::Error;

use crate::error::StoreError;

/// Failures while starting or stopping the actor system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
    #[error("Shutdown signal not delivered: {0}")]
    Signal(#[from] StoreError),
}
