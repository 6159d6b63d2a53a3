//! Hand-written actors that need more than the generic `ResourceActor`.
//!
//! The cart keeps a secondary unique index `(user, product) -> line`, so
//! "add or increment" must be one message rather than a find followed by a
//! create.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::CartClient;
use crate::domain::{CartLine, CartLineId, ProductId, UserId};
use crate::error::StoreError;
use crate::messages::{CartRequest, ServiceResponse};

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

// =============================================================================
// CART SERVICE
// =============================================================================

pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    lines: HashMap<CartLineId, CartLine>,
    index: HashMap<(UserId, ProductId), CartLineId>,
    next_id: u64,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            lines: HashMap::new(),
            index: HashMap::new(),
            next_id: 1,
        };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddLine {
                    user_id,
                    product_id,
                    quantity,
                    respond_to,
                } => self.handle_add_line(user_id, product_id, quantity, respond_to),
                CartRequest::GetLine { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.lines.get(&id).cloned()));
                }
                CartRequest::FindLine {
                    user_id,
                    product_id,
                    respond_to,
                } => {
                    let line = self
                        .index
                        .get(&(user_id, product_id))
                        .and_then(|id| self.lines.get(id))
                        .cloned();
                    let _ = respond_to.send(Ok(line));
                }
                CartRequest::SetQuantity {
                    id,
                    quantity,
                    respond_to,
                } => self.handle_set_quantity(id, quantity, respond_to),
                CartRequest::RemoveLine { id, respond_to } => {
                    let removed = self.remove(id);
                    debug!(line_id = %id, removed, "Remove line");
                    let _ = respond_to.send(Ok(removed));
                }
                CartRequest::LinesForUser { user_id, respond_to } => {
                    self.handle_lines_for_user(user_id, respond_to);
                }
                CartRequest::ClearUser { user_id, respond_to } => {
                    self.handle_clear_user(user_id, respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
                #[cfg(test)]
                CartRequest::LineCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.lines.len()));
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(user_id = %user_id, product_id = %product_id, quantity = %quantity), skip(self, respond_to))]
    fn handle_add_line(
        &mut self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<CartLine, StoreError>,
    ) {
        if quantity == 0 {
            error!("Rejected zero quantity");
            send_error!(
                respond_to,
                StoreError::Rejected("cart quantity must be at least 1".into())
            );
        }

        let line = match self.index.get(&(user_id, product_id)) {
            Some(id) => match self.lines.get_mut(id) {
                Some(line) => {
                    line.quantity = line.quantity.saturating_add(quantity);
                    info!(line_id = %line.id, total_quantity = line.quantity, "Incremented cart line");
                    line.clone()
                }
                None => {
                    error!(line_id = %id, "Cart index points at a missing line");
                    send_error!(
                        respond_to,
                        StoreError::Unavailable(format!("cart index is inconsistent for {id}"))
                    );
                }
            },
            None => {
                let id = CartLineId::new(self.next_id);
                self.next_id += 1;
                let line = CartLine {
                    id,
                    user_id,
                    product_id,
                    quantity,
                    added_at: Utc::now(),
                };
                self.lines.insert(id, line.clone());
                self.index.insert((user_id, product_id), id);
                info!(line_id = %id, "Created cart line");
                line
            }
        };

        let _ = respond_to.send(Ok(line));
    }

    #[instrument(fields(line_id = %id, quantity = %quantity), skip(self, respond_to))]
    fn handle_set_quantity(
        &mut self,
        id: CartLineId,
        quantity: u32,
        respond_to: ServiceResponse<Option<CartLine>, StoreError>,
    ) {
        if quantity == 0 {
            let removed = self.remove(id);
            debug!(removed, "Quantity zero, line removed");
            let _ = respond_to.send(Ok(None));
            return;
        }

        match self.lines.get_mut(&id) {
            Some(line) => {
                line.quantity = quantity;
                info!("Cart line quantity updated");
                let _ = respond_to.send(Ok(Some(line.clone())));
            }
            None => {
                debug!("Cart line not found");
                let _ = respond_to.send(Err(StoreError::NotFound {
                    entity: "cart line",
                    id: id.to_string(),
                }));
            }
        }
    }

    #[instrument(fields(user_id = %user_id), skip(self, respond_to))]
    fn handle_lines_for_user(
        &self,
        user_id: UserId,
        respond_to: ServiceResponse<Vec<CartLine>, StoreError>,
    ) {
        let mut lines: Vec<CartLine> = self
            .lines
            .values()
            .filter(|line| line.user_id == user_id)
            .cloned()
            .collect();
        lines.sort_by_key(|line| line.id);
        debug!(line_count = lines.len(), "Listed cart lines");
        let _ = respond_to.send(Ok(lines));
    }

    #[instrument(fields(user_id = %user_id), skip(self, respond_to))]
    fn handle_clear_user(&mut self, user_id: UserId, respond_to: ServiceResponse<usize, StoreError>) {
        let ids: Vec<CartLineId> = self
            .lines
            .values()
            .filter(|line| line.user_id == user_id)
            .map(|line| line.id)
            .collect();
        for id in &ids {
            self.remove(*id);
        }
        info!(removed = ids.len(), "Cart cleared");
        let _ = respond_to.send(Ok(ids.len()));
    }

    fn remove(&mut self, id: CartLineId) -> bool {
        match self.lines.remove(&id) {
            Some(line) => {
                self.index.remove(&(line.user_id, line.product_id));
                true
            }
            None => false,
        }
    }
}
