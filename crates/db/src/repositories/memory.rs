use std::collections::BTreeMap;

use tokio::sync::RwLock;

use weatherwear_core::domain::product::{Product, ProductCategory, ProductId};

use super::{ProductRepository, RepositoryError};

/// Catalog held in a map keyed by id, so listings come back in id order.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<i64, Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|product| (product.id.0, product)).collect();
        Self { products: RwLock::new(products) }
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.values().filter(|product| product.category == category).cloned().collect())
    }

    async fn save(&self, mut product: Product) -> Result<ProductId, RepositoryError> {
        let mut products = self.products.write().await;
        if product.id.0 <= 0 {
            let next = products.keys().next_back().copied().unwrap_or(0) + 1;
            product.id = ProductId(next);
        }
        let id = product.id;
        products.insert(id.0, product);
        Ok(id)
    }

    async fn count(&self, category: Option<ProductCategory>) -> Result<u64, RepositoryError> {
        let products = self.products.read().await;
        let count = products
            .values()
            .filter(|product| category.map_or(true, |category| product.category == category))
            .count();
        Ok(count as u64)
    }
}
