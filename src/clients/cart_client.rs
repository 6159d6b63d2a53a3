use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{CartLine, CartLineId, ProductId, UserId};
use crate::error::StoreError;
use crate::messages::CartRequest;
use crate::store::CartStore;

/// Client for the cart service.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| StoreError::Unavailable("actor closed".to_string()))
    }
}

client_method!(CartClient => fn add_line_request(user_id: UserId, product_id: ProductId, quantity: u32) -> CartLine as CartRequest::AddLine);
client_method!(CartClient => fn get_line(id: CartLineId) -> Option<CartLine> as CartRequest::GetLine);
client_method!(CartClient => fn find_line_request(user_id: UserId, product_id: ProductId) -> Option<CartLine> as CartRequest::FindLine);
client_method!(CartClient => fn set_quantity_request(id: CartLineId, quantity: u32) -> Option<CartLine> as CartRequest::SetQuantity);
client_method!(CartClient => fn remove_line_request(id: CartLineId) -> bool as CartRequest::RemoveLine);
client_method!(CartClient => fn lines_for_user_request(user_id: UserId) -> Vec<CartLine> as CartRequest::LinesForUser);
client_method!(CartClient => fn clear_user_request(user_id: UserId) -> usize as CartRequest::ClearUser);
#[cfg(test)]
client_method!(CartClient => fn line_count() -> usize as CartRequest::LineCount);

#[async_trait]
impl CartStore for CartClient {
    async fn add_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        self.add_line_request(user_id, product_id, quantity).await
    }

    async fn line(&self, id: CartLineId) -> Result<Option<CartLine>, StoreError> {
        self.get_line(id).await
    }

    async fn find_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, StoreError> {
        self.find_line_request(user_id, product_id).await
    }

    async fn set_quantity(
        &self,
        id: CartLineId,
        quantity: u32,
    ) -> Result<Option<CartLine>, StoreError> {
        self.set_quantity_request(id, quantity).await
    }

    async fn remove_line(&self, id: CartLineId) -> Result<bool, StoreError> {
        self.remove_line_request(id).await
    }

    async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, StoreError> {
        self.lines_for_user_request(user_id).await
    }

    async fn clear_user(&self, user_id: UserId) -> Result<usize, StoreError> {
        self.clear_user_request(user_id).await
    }
}
