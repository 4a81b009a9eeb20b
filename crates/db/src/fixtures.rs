use sqlx::Executor;

use weatherwear_core::domain::product::ProductCategory;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Seeded product ids run from 1 to this bound.
const SEED_PRODUCT_ID_MAX: i64 = 30;

/// Products per category in `catalog_seed.sql`.
const SEED_PRODUCTS_PER_CATEGORY: &[(ProductCategory, i64)] =
    &[(ProductCategory::Cold, 10), (ProductCategory::Mild, 10), (ProductCategory::Hot, 10)];

const SEED_PRICE_MIN: f64 = 10.0;
const SEED_PRICE_MAX: f64 = 50.0;

/// Deterministic demo catalog: ten garments for each product type.
pub struct CatalogSeedDataset;

impl CatalogSeedDataset {
    /// SQL fixture content for the demo catalog.
    pub const SQL: &str = include_str!("../../../config/fixtures/catalog_seed.sql");

    /// Load the catalog. Rows keep fixed ids, so loading twice is a no-op.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        let inserted = tx.execute(sqlx::query(Self::SQL)).await?.rows_affected();
        tx.commit().await?;

        let categories = SEED_PRODUCTS_PER_CATEGORY
            .iter()
            .map(|(category, count)| CategorySeedInfo {
                category: *category,
                label: category.label(),
                products: *count as u64,
            })
            .collect();

        Ok(SeedResult { inserted, categories })
    }

    /// Verify every seeded product exists with its category and a price in range.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for (category, expected) in SEED_PRODUCTS_PER_CATEGORY {
            let actual: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM product p
                 JOIN product_type t ON t.id = p.product_type_id
                 WHERE p.id BETWEEN 1 AND ? AND t.category = ?",
            )
            .bind(SEED_PRODUCT_ID_MAX)
            .bind(category.as_str())
            .fetch_one(pool)
            .await?;
            checks.push((category_check_label(*category), actual == *expected));
        }

        let misnamed: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM product p
             JOIN product_type t ON t.id = p.product_type_id
             WHERE p.id BETWEEN 1 AND ? AND p.name NOT LIKE t.name || ' %'",
        )
        .bind(SEED_PRODUCT_ID_MAX)
        .fetch_one(pool)
        .await?;
        checks.push(("seed-names-prefixed-by-type", misnamed == 0));

        let out_of_range: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM product
             WHERE id BETWEEN 1 AND ?
               AND (CAST(price AS REAL) < ? OR CAST(price AS REAL) > ?)",
        )
        .bind(SEED_PRODUCT_ID_MAX)
        .bind(SEED_PRICE_MIN)
        .bind(SEED_PRICE_MAX)
        .fetch_one(pool)
        .await?;
        checks.push(("seed-prices-in-range", out_of_range == 0));

        let all_present = checks.iter().all(|(_, ok)| *ok);
        Ok(VerificationResult { all_present, checks })
    }

    /// Remove seeded products from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM product WHERE id BETWEEN 1 AND ?")
            .bind(SEED_PRODUCT_ID_MAX)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

fn category_check_label(category: ProductCategory) -> &'static str {
    match category {
        ProductCategory::Cold => "seed-cold-products",
        ProductCategory::Mild => "seed-mild-products",
        ProductCategory::Hot => "seed-hot-products",
    }
}

#[derive(Debug)]
pub struct SeedResult {
    /// Rows written by this load; zero when the catalog was already seeded.
    pub inserted: u64,
    pub categories: Vec<CategorySeedInfo>,
}

#[derive(Debug)]
pub struct CategorySeedInfo {
    pub category: ProductCategory,
    pub label: &'static str,
    pub products: u64,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
