//! Storage capabilities consumed by the ledgers.
//!
//! The actor clients implement these traits. Ledgers hold them as
//! `Arc<dyn ...>` so tests can swap in a store that fails on demand.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    CartLine, CartLineId, Email, NewOrder, NewProduct, NewUser, Order, OrderId, Product,
    ProductId, ProductPatch, User, UserId, UserPatch,
};
use crate::error::StoreError;
use crate::order_actor::{OrderAction, OrderActionResult};

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockReservation {
    Reserved { remaining: u32 },
    Insufficient { available: u32 },
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError>;
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError>;
    async fn stock_level(&self, id: ProductId) -> Result<u32, StoreError>;
    /// `stock -= quantity` if and only if `stock >= quantity`, in one step.
    async fn reserve_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<StockReservation, StoreError>;
    /// Returns the stock level after the increment.
    async fn restore_stock(&self, id: ProductId, quantity: u32) -> Result<u32, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<UserId, StoreError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError>;
    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, StoreError>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Creates the line or adds `quantity` to the existing one.
    async fn add_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, StoreError>;
    async fn line(&self, id: CartLineId) -> Result<Option<CartLine>, StoreError>;
    async fn find_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, StoreError>;
    /// Zero removes the line and yields `None`.
    async fn set_quantity(
        &self,
        id: CartLineId,
        quantity: u32,
    ) -> Result<Option<CartLine>, StoreError>;
    async fn remove_line(&self, id: CartLineId) -> Result<bool, StoreError>;
    /// Lines in insertion order.
    async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, StoreError>;
    async fn clear_user(&self, user_id: UserId) -> Result<usize, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: NewOrder) -> Result<OrderId, StoreError>;
    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
    /// Newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError>;
    /// Applies a status action atomically against the stored order.
    async fn transition(
        &self,
        id: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, StoreError>;
    async fn delete(&self, id: OrderId) -> Result<(), StoreError>;
}

pub type SharedProductStore = Arc<dyn ProductStore>;
pub type SharedUserStore = Arc<dyn UserStore>;
pub type SharedCartStore = Arc<dyn CartStore>;
pub type SharedOrderStore = Arc<dyn OrderStore>;
