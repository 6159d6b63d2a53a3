use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::{Filter, ResourceClient};
use crate::domain::{NewOrder, Order, OrderId, UserId};
use crate::error::StoreError;
use crate::order_actor::{OrderAction, OrderActionResult};
use crate::store::OrderStore;

const ENTITY: &str = "order";

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, "order", order);

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, order), fields(user_id = %order.user_id, lines = order.lines.len()))]
    async fn insert(&self, order: NewOrder) -> Result<OrderId, StoreError> {
        debug!("Sending request");
        self.inner
            .create(order)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.get_order(id).await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .list(Filter::new(move |order: &Order| order.user_id == user_id))
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn transition(
        &self,
        id: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, StoreError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }

    async fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        self.delete_order(id).await
    }
}
