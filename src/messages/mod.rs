use tokio::sync::oneshot;

use crate::domain::{CartLine, CartLineId, ProductId, UserId};
use crate::error::StoreError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the cart service. Each variant carries a oneshot
/// channel for the reply.
#[derive(Debug)]
pub enum CartRequest {
    /// Creates the `(user_id, product_id)` line or adds to its quantity.
    AddLine {
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<CartLine, StoreError>,
    },
    GetLine {
        id: CartLineId,
        respond_to: ServiceResponse<Option<CartLine>, StoreError>,
    },
    FindLine {
        user_id: UserId,
        product_id: ProductId,
        respond_to: ServiceResponse<Option<CartLine>, StoreError>,
    },
    /// Overwrites the quantity; zero removes the line and replies `None`.
    SetQuantity {
        id: CartLineId,
        quantity: u32,
        respond_to: ServiceResponse<Option<CartLine>, StoreError>,
    },
    /// Replies whether a line was actually removed.
    RemoveLine {
        id: CartLineId,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    LinesForUser {
        user_id: UserId,
        respond_to: ServiceResponse<Vec<CartLine>, StoreError>,
    },
    /// Replies with the number of lines removed.
    ClearUser {
        user_id: UserId,
        respond_to: ServiceResponse<usize, StoreError>,
    },
    Shutdown,
    #[cfg(test)]
    LineCount {
        respond_to: ServiceResponse<usize, StoreError>,
    },
}
