use thiserror::Error;

use crate::domain::{OrderId, OrderStatus, ProductId};
use crate::error::{ErrorKind, StoreError};
use crate::pricing::PricingError;

/// Errors that can occur during checkout and order management.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please enter a valid shipping address (at least {min_length} characters)")]
    InvalidAddress { min_length: usize },
    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("Order total cannot be computed: {0}")]
    Pricing(#[from] PricingError),
    #[error("Order could not be created: {0}")]
    OrderCreationFailed(String),
    #[error("Order not found: {0}")]
    NotFound(OrderId),
    #[error("Order cannot be cancelled, it is already being processed (status: {status})")]
    CannotCancel { status: OrderStatus },
    #[error("Order status cannot change from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order storage error: {0}")]
    Storage(#[from] StoreError),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCart
            | Self::InvalidAddress { .. }
            | Self::InvalidPaymentMethod(_)
            | Self::Pricing(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InsufficientStock { .. }
            | Self::CannotCancel { .. }
            | Self::InvalidTransition { .. } => ErrorKind::Conflict,
            Self::OrderCreationFailed(_) | Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
