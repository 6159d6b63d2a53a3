use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::{Filter, FrameworkError, ResourceClient};
use crate::domain::{NewProduct, Product, ProductId, ProductPatch};
use crate::error::StoreError;
use crate::product_actor::{ProductAction, ProductActionResult};
use crate::store::{ProductStore, StockReservation};

const ENTITY: &str = "product";

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, "product", product);

impl ProductClient {
    async fn action(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<ProductActionResult, StoreError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }
}

fn unexpected(result: ProductActionResult) -> StoreError {
    StoreError::from_framework(
        ENTITY,
        FrameworkError::UnexpectedResult(format!("product action returned {result:?}")),
    )
}

#[async_trait]
impl ProductStore for ProductClient {
    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError> {
        debug!("Sending request");
        self.inner
            .create(product)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.get_product(id).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        self.inner
            .list(Filter::all())
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn stock_level(&self, id: ProductId) -> Result<u32, StoreError> {
        debug!("Sending request");
        match self.action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn reserve_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<StockReservation, StoreError> {
        debug!("Sending request");
        match self.action(id, ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::Reserved { remaining } => {
                Ok(StockReservation::Reserved { remaining })
            }
            ProductActionResult::Insufficient { available } => {
                Ok(StockReservation::Insufficient { available })
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn restore_stock(&self, id: ProductId, quantity: u32) -> Result<u32, StoreError> {
        debug!("Sending request");
        match self.action(id, ProductAction::RestoreStock(quantity)).await? {
            ProductActionResult::Restored { stock } => Ok(stock),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_client, expect_action};

    #[tokio::test]
    async fn mismatched_action_result_reads_as_unavailable() {
        let (inner, mut rx) = create_mock_client::<Product>(4);
        let client = ProductClient::new(inner);

        let call = tokio::spawn(async move { client.reserve_stock(ProductId::new(3), 2).await });

        let (id, action, reply) = expect_action(&mut rx).await.expect("reserve request");
        assert_eq!((id, action), (ProductId::new(3), ProductAction::ReserveStock(2)));
        reply.send(Ok(ProductActionResult::StockLevel(7))).unwrap();

        match call.await.unwrap() {
            Err(StoreError::Unavailable(msg)) => assert!(msg.contains("StockLevel(7)")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
