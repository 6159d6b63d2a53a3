//! Compensation log for order placement.
//!
//! The stores have no multi-statement transactions, so each applied step
//! records how to undo itself. `rollback` replays the undo steps newest first;
//! `commit` forgets them.

use tracing::{debug, error, info, instrument, warn};

use crate::domain::{CartLine, OrderId, ProductId, UserId};
use crate::store::{SharedCartStore, SharedOrderStore, SharedProductStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compensation {
    RestoreStock {
        product_id: ProductId,
        quantity: u32,
    },
    DeleteOrder {
        order_id: OrderId,
    },
    /// Re-adds a removed line. The line comes back under a new id.
    RestoreCartLine {
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    },
}

pub(crate) struct CheckoutSession {
    products: SharedProductStore,
    orders: SharedOrderStore,
    cart: SharedCartStore,
    undo: Vec<Compensation>,
}

impl CheckoutSession {
    pub(crate) fn begin(
        products: SharedProductStore,
        orders: SharedOrderStore,
        cart: SharedCartStore,
    ) -> Self {
        Self {
            products,
            orders,
            cart,
            undo: Vec::new(),
        }
    }

    pub(crate) fn stock_reserved(&mut self, product_id: ProductId, quantity: u32) {
        debug!(product_id = %product_id, quantity, "Registered stock compensation");
        self.undo.push(Compensation::RestoreStock {
            product_id,
            quantity,
        });
    }

    pub(crate) fn order_created(&mut self, order_id: OrderId) {
        debug!(order_id = %order_id, "Registered order compensation");
        self.undo.push(Compensation::DeleteOrder { order_id });
    }

    pub(crate) fn cart_line_removed(&mut self, line: &CartLine) {
        debug!(line_id = %line.id, "Registered cart line compensation");
        self.undo.push(Compensation::RestoreCartLine {
            user_id: line.user_id,
            product_id: line.product_id,
            quantity: line.quantity,
        });
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> &[Compensation] {
        &self.undo
    }

    pub(crate) fn commit(self) {
        debug!(steps = self.undo.len(), "Checkout committed");
    }

    /// Undoes every registered step, newest first. Failures are logged and do
    /// not stop the remaining steps.
    #[instrument(skip(self), fields(steps = self.undo.len()))]
    pub(crate) async fn rollback(self) {
        warn!("Rolling back checkout");
        let mut failures = 0usize;
        for step in self.undo.iter().rev() {
            let outcome = match *step {
                Compensation::RestoreStock {
                    product_id,
                    quantity,
                } => self
                    .products
                    .restore_stock(product_id, quantity)
                    .await
                    .map(|_| ()),
                Compensation::DeleteOrder { order_id } => self.orders.delete(order_id).await,
                Compensation::RestoreCartLine {
                    user_id,
                    product_id,
                    quantity,
                } => self
                    .cart
                    .add_line(user_id, product_id, quantity)
                    .await
                    .map(|_| ()),
            };
            if let Err(e) = outcome {
                failures += 1;
                error!(?step, error = %e, "Compensation step failed");
            }
        }
        info!(failures, "Rollback finished");
    }
}
