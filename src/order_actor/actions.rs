use crate::domain::{Order, OrderStatus};

/// Status changes applied inside the order actor, so the check and the write
/// happen in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Regular forward move along the fulfilment graph.
    Advance(OrderStatus),
    /// `Pending -> Cancelled`, refused from any other status.
    Cancel,
    /// Unchecked write for admin tooling.
    Force(OrderStatus),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Updated(Order),
    /// The action did not apply; the order is unchanged.
    Refused { current: OrderStatus },
}
