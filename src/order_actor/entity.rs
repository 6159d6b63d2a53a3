use chrono::Utc;

use super::actions::{OrderAction, OrderActionResult};
use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{NewOrder, Order, OrderId, OrderLine, OrderLineId, OrderStatus};

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = NewOrder;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates a pending order. Line ids are positional and unique within the
    /// order, starting at 1.
    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, FrameworkError> {
        if params.lines.is_empty() {
            return Err(FrameworkError::Rejected("an order needs at least one line".into()));
        }
        if params.lines.iter().any(|line| line.quantity == 0) {
            return Err(FrameworkError::Rejected("order line quantity must be at least 1".into()));
        }

        let lines = params
            .lines
            .into_iter()
            .zip(1u64..)
            .map(|(line, position)| OrderLine {
                id: OrderLineId::new(position),
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Ok(Self {
            id,
            user_id: params.user_id,
            lines,
            subtotal: params.subtotal,
            shipping: params.shipping,
            total: params.total,
            status: OrderStatus::Pending,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            created_at: Utc::now(),
        })
    }

    /// Orders are immutable apart from their status, which moves through actions.
    fn on_update(&mut self, _patch: ()) -> Result<(), FrameworkError> {
        Err(FrameworkError::Rejected("orders cannot be edited".into()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, FrameworkError> {
        let next = match action {
            OrderAction::Advance(next) if self.status.can_advance_to(next) => next,
            OrderAction::Cancel if self.can_cancel() => OrderStatus::Cancelled,
            OrderAction::Force(next) => next,
            OrderAction::Advance(_) | OrderAction::Cancel => {
                return Ok(OrderActionResult::Refused {
                    current: self.status,
                });
            }
        };
        self.status = next;
        Ok(OrderActionResult::Updated(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewOrderLine, PaymentMethod, ProductId, UserId};
    use rust_decimal::Decimal;

    fn pending_order() -> Order {
        let params = NewOrder {
            user_id: UserId::new(1),
            lines: vec![
                NewOrderLine {
                    product_id: ProductId::new(4),
                    quantity: 2,
                    unit_price: Decimal::new(50, 0),
                },
                NewOrderLine {
                    product_id: ProductId::new(5),
                    quantity: 1,
                    unit_price: Decimal::new(10, 0),
                },
            ],
            subtotal: Decimal::new(110, 0),
            shipping: Decimal::new(2990, 2),
            total: Decimal::new(13990, 2),
            shipping_address: "Full Address 123".into(),
            payment_method: PaymentMethod::CashOnDelivery,
        };
        Order::from_create_params(OrderId::new(1), params).unwrap()
    }

    #[test]
    fn created_orders_are_pending_with_positional_line_ids() {
        let order = pending_order();
        assert_eq!(order.status, OrderStatus::Pending);
        let ids: Vec<_> = order.lines.iter().map(|line| line.id.get()).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn cancel_only_from_pending() {
        let mut order = pending_order();
        assert!(matches!(
            order.handle_action(OrderAction::Cancel),
            Ok(OrderActionResult::Updated(_))
        ));
        assert_eq!(
            order.handle_action(OrderAction::Cancel),
            Ok(OrderActionResult::Refused {
                current: OrderStatus::Cancelled
            })
        );
    }

    #[test]
    fn advance_refuses_backwards_moves() {
        let mut order = pending_order();
        order.handle_action(OrderAction::Advance(OrderStatus::Shipped)).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::Advance(OrderStatus::Processing)),
            Ok(OrderActionResult::Refused {
                current: OrderStatus::Shipped
            })
        );
        assert_eq!(
            order.handle_action(OrderAction::Cancel),
            Ok(OrderActionResult::Refused {
                current: OrderStatus::Shipped
            })
        );
    }

    #[test]
    fn force_ignores_the_graph() {
        let mut order = pending_order();
        order.handle_action(OrderAction::Advance(OrderStatus::Delivered)).unwrap();
        let result = order.handle_action(OrderAction::Force(OrderStatus::Processing));
        assert!(matches!(result, Ok(OrderActionResult::Updated(_))));
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn empty_orders_are_rejected() {
        let params = NewOrder {
            user_id: UserId::new(1),
            lines: Vec::new(),
            subtotal: Decimal::ZERO,
            shipping: Decimal::ZERO,
            total: Decimal::ZERO,
            shipping_address: "Full Address 123".into(),
            payment_method: PaymentMethod::CreditCard,
        };
        assert!(Order::from_create_params(OrderId::new(1), params).is_err());
    }
}
