use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog entry. Only `stock` changes after creation, and only through
/// order placement and cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub stock: u32,
    pub rating: f32,
    pub review_count: u32,
}

impl Product {
    /// Whether `quantity` units can be taken from the current stock.
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.clone(),
            image: self.image.clone(),
            brand: self.brand.clone(),
        }
    }
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub stock: u32,
    pub rating: f32,
    pub review_count: u32,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            brand: String::new(),
            image: String::new(),
            stock,
            rating: 0.0,
            review_count: 0,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            brand: self.brand,
            image: self.image,
            stock: self.stock,
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

/// Payload for editing catalog metadata. Stock is deliberately absent: it only
/// moves through reserve/restore actions.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Display-only copy of product fields shown next to historical order lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub image: String,
    pub brand: String,
}
