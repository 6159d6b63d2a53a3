use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::config::CartPolicy;
use crate::domain::{CartItem, CartLine, CartLineId, ProductId, UserId};
use crate::error::{ErrorKind, StoreError};
use crate::pricing::{self, PricingError, Quote, ShippingPolicy};
use crate::store::{SharedCartStore, SharedProductStore};

/// Errors from cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("Cart line not found: {0}")]
    LineNotFound(CartLineId),
    #[error("Cart total cannot be computed: {0}")]
    Pricing(#[from] PricingError),
    #[error("Cart storage error: {0}")]
    Storage(#[from] StoreError),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidQuantity | Self::Pricing(_) => ErrorKind::Validation,
            Self::ProductNotFound(_) | Self::LineNotFound(_) => ErrorKind::NotFound,
            Self::OutOfStock { .. } => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Per-user product quantities, priced against the live catalog.
#[derive(Clone)]
pub struct CartLedger {
    cart: SharedCartStore,
    products: SharedProductStore,
    shipping: ShippingPolicy,
    policy: CartPolicy,
}

impl CartLedger {
    pub fn new(
        cart: SharedCartStore,
        products: SharedProductStore,
        shipping: ShippingPolicy,
        policy: CartPolicy,
    ) -> Self {
        Self {
            cart,
            products,
            shipping,
            policy,
        }
    }

    /// Adds `quantity` units, creating the line or incrementing it.
    ///
    /// Stock is checked against `quantity` alone unless
    /// [`CartPolicy::strict_stock`] is set, in which case the combined line
    /// quantity must fit.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let product = self
            .products
            .get(product_id)
            .await
            .map_err(|e| log_storage("load product", e))?
            .ok_or(CartError::ProductNotFound(product_id))?;

        let requested = if self.policy.strict_stock {
            let existing = self
                .cart
                .find_line(user_id, product_id)
                .await
                .map_err(|e| log_storage("find cart line", e))?
                .map_or(0, |line| line.quantity);
            existing.saturating_add(quantity)
        } else {
            quantity
        };

        if !product.has_stock_for(requested) {
            warn!(requested, available = product.stock, "Out of stock");
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: product.stock,
            });
        }

        let line = self
            .cart
            .add_line(user_id, product_id, quantity)
            .await
            .map_err(|e| log_storage("add cart line", e))?;
        info!(line_id = %line.id, total_quantity = line.quantity, "Added to cart");
        Ok(line)
    }

    /// Removing a line that does not exist is not an error.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn remove_item(&self, line_id: CartLineId) -> Result<(), CartError> {
        let removed = self
            .cart
            .remove_line(line_id)
            .await
            .map_err(|e| log_storage("remove cart line", e))?;
        debug!(removed, "Remove item");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), CartError> {
        let line = self
            .cart
            .find_line(user_id, product_id)
            .await
            .map_err(|e| log_storage("find cart line", e))?;
        match line {
            Some(line) => self.remove_item(line.id).await,
            None => Ok(()),
        }
    }

    /// Overwrites the quantity. Zero removes the line and yields `None`.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn update_quantity(
        &self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<Option<CartLine>, CartError> {
        if quantity == 0 {
            self.remove_item(line_id).await?;
            return Ok(None);
        }

        if self.policy.strict_stock {
            let line = self.line(line_id).await?;
            let product = self
                .products
                .get(line.product_id)
                .await
                .map_err(|e| log_storage("load product", e))?
                .ok_or(CartError::ProductNotFound(line.product_id))?;
            if !product.has_stock_for(quantity) {
                warn!(available = product.stock, "Out of stock");
                return Err(CartError::OutOfStock {
                    product_id: line.product_id,
                    requested: quantity,
                    available: product.stock,
                });
            }
        }

        match self.cart.set_quantity(line_id, quantity).await {
            Ok(line) => {
                info!("Cart quantity updated");
                Ok(line)
            }
            Err(StoreError::NotFound { .. }) => Err(CartError::LineNotFound(line_id)),
            Err(e) => Err(log_storage("set cart quantity", e)),
        }
    }

    pub async fn increase_quantity(
        &self,
        line_id: CartLineId,
    ) -> Result<Option<CartLine>, CartError> {
        let line = self.line(line_id).await?;
        self.update_quantity(line_id, line.quantity.saturating_add(1))
            .await
    }

    /// At quantity 1 the line is removed outright.
    pub async fn decrease_quantity(
        &self,
        line_id: CartLineId,
    ) -> Result<Option<CartLine>, CartError> {
        let line = self.line(line_id).await?;
        if line.quantity <= 1 {
            self.remove_item(line_id).await?;
            return Ok(None);
        }
        self.update_quantity(line_id, line.quantity - 1).await
    }

    /// Cart lines joined with current product data. Lines whose product no
    /// longer resolves are kept with `product: None`.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn items(&self, user_id: UserId) -> Result<Vec<CartItem>, CartError> {
        let lines = self
            .cart
            .lines_for_user(user_id)
            .await
            .map_err(|e| log_storage("list cart lines", e))?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self
                .products
                .get(line.product_id)
                .await
                .map_err(|e| log_storage("load product", e))?;
            items.push(CartItem { line, product });
        }
        debug!(item_count = items.len(), "Loaded cart");
        Ok(items)
    }

    /// Never fails; a storage error is logged and reads as an empty cart.
    pub async fn get_cart(&self, user_id: UserId) -> Vec<CartItem> {
        match self.items(user_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Cart unavailable, showing it empty");
                Vec::new()
            }
        }
    }

    /// Live subtotal, before shipping.
    pub async fn total(&self, user_id: UserId) -> Result<Decimal, CartError> {
        let items = self.items(user_id).await?;
        Ok(pricing::subtotal(&items)?)
    }

    pub async fn quote(&self, user_id: UserId) -> Result<Quote, CartError> {
        let items = self.items(user_id).await?;
        Ok(self.shipping.quote(&items)?)
    }

    /// Units across all lines whose product still resolves, saturating at
    /// `u32::MAX`.
    pub async fn item_count(&self, user_id: UserId) -> Result<u32, CartError> {
        let items = self.items(user_id).await?;
        Ok(items
            .iter()
            .filter(|item| item.product.is_some())
            .map(CartItem::quantity)
            .fold(0, u32::saturating_add))
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn clear(&self, user_id: UserId) -> Result<usize, CartError> {
        let removed = self
            .cart
            .clear_user(user_id)
            .await
            .map_err(|e| log_storage("clear cart", e))?;
        info!(removed, "Cart cleared");
        Ok(removed)
    }

    pub(crate) fn store(&self) -> SharedCartStore {
        self.cart.clone()
    }

    async fn line(&self, line_id: CartLineId) -> Result<CartLine, CartError> {
        self.cart
            .line(line_id)
            .await
            .map_err(|e| log_storage("load cart line", e))?
            .ok_or(CartError::LineNotFound(line_id))
    }
}

fn log_storage(operation: &'static str, err: StoreError) -> CartError {
    error!(operation, error = %err, "Cart storage failure");
    CartError::Storage(err)
}
