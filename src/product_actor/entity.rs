use rust_decimal::Decimal;

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{NewProduct, Product, ProductId, ProductPatch};

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = NewProduct;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn from_create_params(id: ProductId, params: NewProduct) -> Result<Self, FrameworkError> {
        if params.name.trim().is_empty() {
            return Err(FrameworkError::Rejected("product name is required".into()));
        }
        if params.price < Decimal::ZERO {
            return Err(FrameworkError::Rejected(format!(
                "price cannot be negative: {}",
                params.price
            )));
        }
        Ok(params.into_product(id))
    }

    /// Updates catalog metadata. Stock never changes here.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), FrameworkError> {
        if let Some(price) = patch.price {
            if price < Decimal::ZERO {
                return Err(FrameworkError::Rejected(format!(
                    "price cannot be negative: {price}"
                )));
            }
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, FrameworkError> {
        let result = match action {
            ProductAction::CheckStock => ProductActionResult::StockLevel(self.stock),
            ProductAction::ReserveStock(amount) => {
                if self.has_stock_for(amount) {
                    self.stock -= amount;
                    ProductActionResult::Reserved {
                        remaining: self.stock,
                    }
                } else {
                    ProductActionResult::Insufficient {
                        available: self.stock,
                    }
                }
            }
            ProductAction::RestoreStock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                ProductActionResult::Restored { stock: self.stock }
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tent(stock: u32) -> Product {
        NewProduct::new("Tent", Decimal::new(100, 0), stock).into_product(ProductId::new(1))
    }

    #[test]
    fn reserve_is_conditional() {
        let mut product = tent(3);
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(2)),
            Ok(ProductActionResult::Reserved { remaining: 1 })
        );
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(2)),
            Ok(ProductActionResult::Insufficient { available: 1 })
        );
        assert_eq!(product.stock, 1);
    }

    #[test]
    fn restore_saturates() {
        let mut product = tent(u32::MAX - 1);
        assert_eq!(
            product.handle_action(ProductAction::RestoreStock(5)),
            Ok(ProductActionResult::Restored { stock: u32::MAX })
        );
    }

    #[test]
    fn create_rejects_negative_price_and_blank_name() {
        let negative = NewProduct::new("Stove", Decimal::new(-1, 0), 1);
        assert!(Product::from_create_params(ProductId::new(1), negative).is_err());
        let blank = NewProduct::new("  ", Decimal::ONE, 1);
        assert!(Product::from_create_params(ProductId::new(1), blank).is_err());
    }

    #[test]
    fn update_leaves_stock_alone() {
        let mut product = tent(4);
        let patch = ProductPatch {
            price: Some(Decimal::new(120, 0)),
            ..Default::default()
        };
        product.on_update(patch).unwrap();
        assert_eq!(product.price, Decimal::new(120, 0));
        assert_eq!(product.stock, 4);
    }
}
