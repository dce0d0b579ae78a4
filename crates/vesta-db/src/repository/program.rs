//! # Wholesale Program Repository
//!
//! Per-seller wholesale configuration: deposit percentage, minimum order
//! value, offered payment terms, currency. Sellers that never configured a
//! program simply have no row; callers fall back to
//! [`SellerProgram::defaults`].

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vesta_core::SellerProgram;

/// Repository for seller wholesale-program settings.
#[derive(Debug, Clone)]
pub struct ProgramRepository {
    pool: SqlitePool,
}

impl ProgramRepository {
    /// Creates a new ProgramRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProgramRepository { pool }
    }

    /// Gets a seller's program settings, `None` when never configured.
    pub async fn get(&self, seller_id: &str) -> DbResult<Option<SellerProgram>> {
        let program = sqlx::query_as::<_, SellerProgram>(
            r#"
            SELECT
                seller_id, deposit_percentage,
                minimum_order_value_minor_units,
                allowed_payment_terms, currency
            FROM wholesale_programs
            WHERE seller_id = ?1
            "#,
        )
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(program)
    }

    /// Gets a seller's program, falling back to platform defaults when the
    /// seller never configured one.
    pub async fn get_or_default(&self, seller_id: &str) -> DbResult<SellerProgram> {
        Ok(self
            .get(seller_id)
            .await?
            .unwrap_or_else(|| SellerProgram::defaults(seller_id)))
    }

    /// Creates or replaces a seller's program settings.
    pub async fn upsert(&self, program: &SellerProgram) -> DbResult<()> {
        debug!(
            seller_id = %program.seller_id,
            deposit_percentage = program.deposit_percentage,
            "Upserting wholesale program"
        );

        let terms_json = serde_json::to_string(&program.allowed_payment_terms)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO wholesale_programs (
                seller_id, deposit_percentage,
                minimum_order_value_minor_units,
                allowed_payment_terms, currency
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(seller_id) DO UPDATE SET
                deposit_percentage = excluded.deposit_percentage,
                minimum_order_value_minor_units = excluded.minimum_order_value_minor_units,
                allowed_payment_terms = excluded.allowed_payment_terms,
                currency = excluded.currency
            "#,
        )
        .bind(&program.seller_id)
        .bind(program.deposit_percentage)
        .bind(program.minimum_order_value_minor_units)
        .bind(terms_json)
        .bind(&program.currency)
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

    #[tokio::test]
    async fn test_unconfigured_seller_gets_defaults() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.programs();

        assert!(repo.get("s-1").await.unwrap().is_none());

        let program = repo.get_or_default("s-1").await.unwrap();
        assert_eq!(program.deposit_percentage, 0);
        assert_eq!(program.allowed_payment_terms, vec!["Net 30".to_string()]);
    }

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.programs();

        let mut program = SellerProgram::defaults("s-1");
        program.deposit_percentage = 30;
        program.minimum_order_value_minor_units = Some(50_000);
        program.allowed_payment_terms = vec!["Net 30".to_string(), "Immediate".to_string()];

        repo.upsert(&program).await.unwrap();

        let found = repo.get("s-1").await.unwrap().unwrap();
        assert_eq!(found.deposit_percentage, 30);
        assert_eq!(found.minimum_order_value_minor_units, Some(50_000));
        assert_eq!(
            found.allowed_payment_terms,
            vec!["Net 30".to_string(), "Immediate".to_string()]
        );

        // Upsert replaces in place
        program.deposit_percentage = 50;
        repo.upsert(&program).await.unwrap();
        let found = repo.get("s-1").await.unwrap().unwrap();
        assert_eq!(found.deposit_percentage, 50);
    }
}
