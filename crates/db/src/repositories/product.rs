use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::Row;

use weatherwear_core::domain::product::{Product, ProductCategory, ProductId};

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_str: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let category_str: String =
        row.try_get("category").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = Decimal::from_str(price_str.trim()).map_err(|e| {
        RepositoryError::Decode(format!("product {id} has invalid price `{price_str}`: {e}"))
    })?;
    let category = ProductCategory::parse(&category_str).ok_or_else(|| {
        RepositoryError::Decode(format!("product {id} has unknown category `{category_str}`"))
    })?;

    Ok(Product { id: ProductId(id), name, price, category })
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn find_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT p.id, p.name, p.price, t.category
             FROM product p
             JOIN product_type t ON t.id = p.product_type_id
             WHERE t.category = ?
             ORDER BY p.id ASC",
        )
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect::<Result<Vec<_>, _>>()
    }

    async fn save(&self, product: Product) -> Result<ProductId, RepositoryError> {
        let type_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM product_type WHERE category = ?")
                .bind(product.category.as_str())
                .fetch_optional(&self.pool)
                .await?;
        let type_id = type_id.ok_or_else(|| {
            RepositoryError::Decode(format!(
                "no product_type row for category `{}`",
                product.category
            ))
        })?;

        // Ids at or below zero are unassigned; let SQLite allocate one.
        let id: i64 = if product.id.0 > 0 {
            sqlx::query_scalar(
                "INSERT INTO product (id, name, price, product_type_id)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     price = excluded.price,
                     product_type_id = excluded.product_type_id
                 RETURNING id",
            )
            .bind(product.id.0)
            .bind(&product.name)
            .bind(product.price.to_string())
            .bind(type_id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "INSERT INTO product (name, price, product_type_id) VALUES (?, ?, ?) RETURNING id",
            )
            .bind(&product.name)
            .bind(product.price.to_string())
            .bind(type_id)
            .fetch_one(&self.pool)
            .await?
        };

        Ok(ProductId(id))
    }

    async fn count(&self, category: Option<ProductCategory>) -> Result<u64, RepositoryError> {
        let count: i64 = match category {
            Some(category) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM product p
                     JOIN product_type t ON t.id = p.product_type_id
                     WHERE t.category = ?",
                )
                .bind(category.as_str())
                .fetch_one(&self.pool)
                .await?
            }
            None => sqlx::query_scalar("SELECT COUNT(*) FROM product").fetch_one(&self.pool).await?,
        };

        u64::try_from(count).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}
