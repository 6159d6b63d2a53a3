use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartLineId, Product, ProductId, UserId};

/// One product in a user's cart. `(user_id, product_id)` is unique and
/// `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// A cart line joined with the product as it looks right now.
///
/// `product` is `None` when the product no longer resolves; such items are
/// worth nothing and are skipped at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub line: CartLine,
    pub product: Option<Product>,
}

impl CartItem {
    pub fn id(&self) -> CartLineId {
        self.line.id
    }

    pub fn quantity(&self) -> u32 {
        self.line.quantity
    }

    pub fn unit_price(&self) -> Option<Decimal> {
        self.product.as_ref().map(|product| product.price)
    }
}
