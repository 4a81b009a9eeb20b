use async_trait::async_trait;
use thiserror::Error;

use weatherwear_core::domain::product::{Product, ProductCategory, ProductId};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Product catalog lookups keyed by temperature category.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product of the category, ordered by id. An empty catalog is not an error.
    async fn find_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Inserts a product, or replaces the one with the same id. Returns the stored id.
    async fn save(&self, product: Product) -> Result<ProductId, RepositoryError>;

    async fn count(&self, category: Option<ProductCategory>) -> Result<u64, RepositoryError>;
}
