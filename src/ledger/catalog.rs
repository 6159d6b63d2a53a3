use tracing::{debug, error, info, instrument};

use crate::domain::{NewProduct, Product, ProductId, ProductPatch};
use crate::error::StoreError;
use crate::product_actor::ProductError;
use crate::store::SharedProductStore;

/// Number of products shown in the "popular" and "new arrivals" strips.
pub const SHOWCASE_LIMIT: usize = 6;

const MIN_SEARCH_QUERY_CHARS: usize = 2;

/// Read side of the product catalog, plus seeding for admin tooling.
#[derive(Clone)]
pub struct Catalog {
    products: SharedProductStore,
}

impl Catalog {
    pub fn new(products: SharedProductStore) -> Self {
        Self { products }
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: NewProduct) -> Result<ProductId, ProductError> {
        if product.name.trim().is_empty() {
            return Err(ProductError::Validation("name must not be empty".into()));
        }
        if product.price.is_sign_negative() && !product.price.is_zero() {
            return Err(ProductError::Validation(format!(
                "price must not be negative, got {}",
                product.price
            )));
        }

        let id = self.products.insert(product).await.map_err(|e| {
            error!(error = %e, "Failed to add product");
            e
        })?;
        info!(product_id = %id, "Product added");
        Ok(id)
    }

    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        match self.products.update(id, patch).await {
            Ok(product) => {
                info!("Product updated");
                Ok(product)
            }
            Err(StoreError::NotFound { .. }) => Err(ProductError::NotFound(id)),
            Err(StoreError::Rejected(reason)) => Err(ProductError::Validation(reason)),
            Err(e) => {
                error!(error = %e, "Failed to update product");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.products.get(id).await?)
    }

    pub async fn all_products(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.products.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, ProductError> {
        let products = self.all_products().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.category == category)
            .collect())
    }

    /// Case-insensitive substring match on name, description and brand.
    /// Queries shorter than two characters match nothing.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ProductError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_QUERY_CHARS {
            debug!("Query too short");
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let products = self.all_products().await?;
        let hits: Vec<Product> = products
            .into_iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.brand.to_lowercase().contains(&needle)
            })
            .collect();
        debug!(hits = hits.len(), "Search finished");
        Ok(hits)
    }

    /// Distinct categories in catalog order.
    pub async fn categories(&self) -> Result<Vec<String>, ProductError> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.all_products().await? {
            if !product.category.is_empty() && !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        Ok(categories)
    }

    pub async fn popular(&self, limit: usize) -> Result<Vec<Product>, ProductError> {
        let mut products = self.all_products().await?;
        products.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.id.cmp(&b.id)));
        products.truncate(limit);
        Ok(products)
    }

    pub async fn newest(&self, limit: usize) -> Result<Vec<Product>, ProductError> {
        let mut products = self.all_products().await?;
        products.sort_by(|a, b| b.id.cmp(&a.id));
        products.truncate(limit);
        Ok(products)
    }

    /// False when the product is missing or has fewer than `quantity` units.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn check_stock(&self, id: ProductId, quantity: u32) -> Result<bool, ProductError> {
        match self.products.stock_level(id).await {
            Ok(stock) => Ok(stock >= quantity),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => {
                error!(error = %e, "Stock check failed");
                Err(e.into())
            }
        }
    }
}
