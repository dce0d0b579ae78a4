//! # Product Repository
//!
//! Catalog reads for wholesale item resolution, plus the writes the seed
//! tool and tests need. Catalog management proper (search, stock, pricing
//! updates) lives in the platform's catalog service, not here.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vesta_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by ID. Returns `None` when absent; the engine decides
    /// whether absence is an error.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, seller_id, name, sku, image_url,
                price_minor_units, moq, currency,
                created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists a seller's catalog, newest first.
    pub async fn list_by_seller(&self, seller_id: &str, limit: u32) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, seller_id, name, sku, image_url,
                price_minor_units, moq, currency,
                created_at, updated_at
            FROM products
            WHERE seller_id = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(seller_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, seller_id, name, sku, image_url,
                price_minor_units, moq, currency,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&product.id)
        .bind(&product.seller_id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.image_url)
        .bind(product.price_minor_units)
        .bind(product.moq)
        .bind(&product.currency)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use chrono::Utc;

    fn product(id: &str, seller_id: &str) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            seller_id: seller_id.to_string(),
            name: "Stoneware Mug".to_string(),
            sku: Some("MUG-12".to_string()),
            image_url: None,
            price_minor_units: 1250,
            moq: Some(24),
            currency: "USD".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.products();

        repo.insert(&product("p-1", "s-1")).await.unwrap();

        let found = repo.get_by_id("p-1").await.unwrap().unwrap();
        assert_eq!(found.seller_id, "s-1");
        assert_eq!(found.price_minor_units, 1250);
        assert_eq!(found.moq, Some(24));
        assert_eq!(found.sku.as_deref(), Some("MUG-12"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.products().get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_seller_scopes() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.products();

        repo.insert(&product("p-1", "s-1")).await.unwrap();
        repo.insert(&product("p-2", "s-1")).await.unwrap();
        repo.insert(&product("p-3", "s-2")).await.unwrap();

        let listed = repo.list_by_seller("s-1", 50).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|p| p.seller_id == "s-1"));
    }
}
