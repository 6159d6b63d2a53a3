use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::CheckoutPolicy;
use crate::domain::{
    CartItem, NewOrder, NewOrderLine, Order, OrderId, OrderLineView, OrderStatus, OrderView,
    PaymentMethod, ProductId, UserId,
};
use crate::error::StoreError;
use crate::ledger::cart::CartLedger;
use crate::ledger::checkout::CheckoutSession;
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::pricing::ShippingPolicy;
use crate::store::{SharedOrderStore, SharedProductStore, StockReservation};

/// Outcome of a cancellation. The order is cancelled either way; `failed`
/// lists lines whose stock could not be put back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelReport {
    pub order_id: OrderId,
    pub restored: Vec<(ProductId, u32)>,
    pub failed: Vec<FailedRestore>,
}

impl CancelReport {
    pub fn fully_restored(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedRestore {
    pub product_id: ProductId,
    pub quantity: u32,
    pub reason: String,
}

/// Turns carts into orders and manages them afterwards.
#[derive(Clone)]
pub struct OrderLedger {
    orders: SharedOrderStore,
    products: SharedProductStore,
    cart: CartLedger,
    shipping: ShippingPolicy,
    checkout: CheckoutPolicy,
}

impl OrderLedger {
    pub fn new(
        orders: SharedOrderStore,
        products: SharedProductStore,
        cart: CartLedger,
        shipping: ShippingPolicy,
        checkout: CheckoutPolicy,
    ) -> Self {
        Self {
            orders,
            products,
            cart,
            shipping,
            checkout,
        }
    }

    /// Places an order from the user's current cart.
    ///
    /// Stock is reserved line by line with a conditional decrement, then the
    /// order is stored and the ordered lines are removed from the cart. Lines
    /// whose product no longer resolves stay in the cart. If any step fails
    /// the applied steps are undone and no order remains.
    #[instrument(skip(self, shipping_address), fields(user_id = %user_id))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        shipping_address: &str,
        payment_method: &str,
    ) -> Result<OrderId, OrderError> {
        let shipping_address = self.validate_address(shipping_address)?;
        let payment_method = self.validate_payment_method(payment_method)?;

        let items = self.cart.items(user_id).await.map_err(|e| {
            error!(error = %e, "Could not read cart");
            OrderError::OrderCreationFailed(e.to_string())
        })?;
        let total_items = items.len();
        let items: Vec<CartItem> = items
            .into_iter()
            .filter(|item| item.product.is_some())
            .collect();
        if items.len() < total_items {
            warn!(
                skipped = total_items - items.len(),
                "Skipping cart lines whose product no longer exists"
            );
        }
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let quote = self.shipping.quote(&items).map_err(|e| {
            warn!(error = %e, "Cart total out of range");
            OrderError::Pricing(e)
        })?;
        let cart_store = self.cart.store();
        let mut lines = Vec::with_capacity(items.len());
        let mut session = CheckoutSession::begin(
            self.products.clone(),
            self.orders.clone(),
            cart_store.clone(),
        );

        for item in &items {
            let Some(product) = item.product.as_ref() else {
                continue;
            };
            let quantity = item.quantity();
            match self.products.reserve_stock(product.id, quantity).await {
                Ok(StockReservation::Reserved { remaining }) => {
                    debug!(product_id = %product.id, quantity, remaining, "Stock reserved");
                    session.stock_reserved(product.id, quantity);
                }
                Ok(StockReservation::Insufficient { available }) => {
                    warn!(product_id = %product.id, quantity, available, "Insufficient stock");
                    session.rollback().await;
                    return Err(OrderError::InsufficientStock {
                        product_id: product.id,
                        requested: quantity,
                        available,
                    });
                }
                Err(e) => {
                    error!(product_id = %product.id, error = %e, "Stock reservation failed");
                    session.rollback().await;
                    return Err(OrderError::OrderCreationFailed(e.to_string()));
                }
            }
            lines.push(NewOrderLine {
                product_id: product.id,
                quantity,
                unit_price: product.price,
            });
        }

        let order = NewOrder {
            user_id,
            lines,
            subtotal: quote.subtotal,
            shipping: quote.shipping,
            total: quote.total,
            shipping_address,
            payment_method,
        };
        let order_id = match self.orders.insert(order).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order insert failed");
                session.rollback().await;
                return Err(OrderError::OrderCreationFailed(e.to_string()));
            }
        };
        session.order_created(order_id);

        for item in &items {
            match cart_store.remove_line(item.line.id).await {
                Ok(true) => session.cart_line_removed(&item.line),
                Ok(false) => debug!(line_id = %item.line.id, "Cart line already gone"),
                Err(e) => {
                    error!(
                        order_id = %order_id,
                        line_id = %item.line.id,
                        error = %e,
                        "Cart line removal failed"
                    );
                    session.rollback().await;
                    return Err(OrderError::OrderCreationFailed(e.to_string()));
                }
            }
        }

        session.commit();
        info!(order_id = %order_id, total = %quote.total, "Order placed");
        Ok(order_id)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_by_id(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .get(order_id)
            .await
            .map_err(|e| log_storage("load order", e))?
            .ok_or(OrderError::NotFound(order_id))
    }

    /// Newest first.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_orders(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self
            .orders
            .list_for_user(user_id)
            .await
            .map_err(|e| log_storage("list orders", e))?;
        debug!(count = orders.len(), "Loaded orders");
        Ok(orders)
    }

    pub async fn order_view(&self, order_id: OrderId) -> Result<OrderView, OrderError> {
        let order = self.get_by_id(order_id).await?;
        Ok(self.view(order).await)
    }

    pub async fn orders_view(&self, user_id: UserId) -> Result<Vec<OrderView>, OrderError> {
        let orders = self.get_orders(user_id).await?;
        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            views.push(self.view(order).await);
        }
        Ok(views)
    }

    /// Moves an order forward along `pending -> processing -> shipped ->
    /// delivered`. Backward moves, moves out of a terminal status and moves to
    /// `cancelled` are refused; cancelling goes through [`Self::cancel`].
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        match self.transition(order_id, OrderAction::Advance(status)).await? {
            OrderActionResult::Updated(order) => {
                info!("Order status updated");
                Ok(order)
            }
            OrderActionResult::Refused { current } => {
                warn!(
                    current = %current,
                    terminal = current.is_terminal(),
                    "Refused status transition"
                );
                Err(OrderError::InvalidTransition {
                    from: current,
                    to: status,
                })
            }
        }
    }

    /// Writes `status` without checking the transition graph. Stock is not
    /// touched, even when forcing `cancelled`.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn force_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        warn!("Forcing order status outside the transition graph");
        match self.transition(order_id, OrderAction::Force(status)).await? {
            OrderActionResult::Updated(order) => Ok(order),
            OrderActionResult::Refused { current } => Err(OrderError::InvalidTransition {
                from: current,
                to: status,
            }),
        }
    }

    /// Cancels a pending order and puts its stock back.
    ///
    /// The status flip happens first and atomically, so a second cancel of
    /// the same order fails with `CannotCancel` and never restores stock
    /// twice. A line whose restore fails is logged and reported; the others
    /// still go through.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel(&self, order_id: OrderId) -> Result<CancelReport, OrderError> {
        let order = match self.transition(order_id, OrderAction::Cancel).await? {
            OrderActionResult::Updated(order) => order,
            OrderActionResult::Refused { current } => {
                warn!(
                    status = %current,
                    terminal = current.is_terminal(),
                    "Order cannot be cancelled"
                );
                return Err(OrderError::CannotCancel { status: current });
            }
        };

        let mut report = CancelReport {
            order_id,
            restored: Vec::new(),
            failed: Vec::new(),
        };
        for line in &order.lines {
            match self
                .products
                .restore_stock(line.product_id, line.quantity)
                .await
            {
                Ok(stock) => {
                    debug!(product_id = %line.product_id, quantity = line.quantity, stock, "Stock restored");
                    report.restored.push((line.product_id, line.quantity));
                }
                Err(e) => {
                    error!(
                        product_id = %line.product_id,
                        quantity = line.quantity,
                        error = %e,
                        "Failed to restore stock"
                    );
                    report.failed.push(FailedRestore {
                        product_id: line.product_id,
                        quantity: line.quantity,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            restored = report.restored.len(),
            failed = report.failed.len(),
            "Order cancelled"
        );
        Ok(report)
    }

    fn validate_address(&self, address: &str) -> Result<String, OrderError> {
        let address = address.trim();
        if address.chars().count() < self.checkout.min_address_length {
            return Err(OrderError::InvalidAddress {
                min_length: self.checkout.min_address_length,
            });
        }
        Ok(address.to_string())
    }

    fn validate_payment_method(&self, raw: &str) -> Result<PaymentMethod, OrderError> {
        let method: PaymentMethod = raw
            .parse()
            .map_err(|_| OrderError::InvalidPaymentMethod(raw.to_string()))?;
        if method == PaymentMethod::BankTransfer && !self.checkout.accept_bank_transfer {
            return Err(OrderError::InvalidPaymentMethod(raw.to_string()));
        }
        Ok(method)
    }

    async fn transition(
        &self,
        order_id: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, OrderError> {
        match self.orders.transition(order_id, action).await {
            Ok(result) => Ok(result),
            Err(StoreError::NotFound { .. }) => Err(OrderError::NotFound(order_id)),
            Err(e) => Err(log_storage("transition order", e)),
        }
    }

    async fn view(&self, order: Order) -> OrderView {
        let mut lines = Vec::with_capacity(order.lines.len());
        for line in order.lines {
            let product = match self.products.get(line.product_id).await {
                Ok(product) => product.map(|product| product.snapshot()),
                Err(e) => {
                    warn!(product_id = %line.product_id, error = %e, "Product snapshot unavailable");
                    None
                }
            };
            lines.push(OrderLineView { line, product });
        }
        OrderView {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            subtotal: order.subtotal,
            shipping: order.shipping,
            total: order.total,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            created_at: order.created_at,
            lines,
        }
    }
}

fn log_storage(operation: &'static str, err: StoreError) -> OrderError {
    error!(operation, error = %err, "Order storage failure");
    OrderError::Storage(err)
}
