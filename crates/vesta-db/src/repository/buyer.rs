//! # Buyer Repository
//!
//! Buyer contact lookups. The engine reads these once per placement to
//! freeze the buyer's email and display name onto the order header.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vesta_core::Buyer;

/// Repository for buyer database operations.
#[derive(Debug, Clone)]
pub struct BuyerRepository {
    pool: SqlitePool,
}

impl BuyerRepository {
    /// Creates a new BuyerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BuyerRepository { pool }
    }

    /// Gets a buyer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Buyer>> {
        let buyer = sqlx::query_as::<_, Buyer>(
            r#"
            SELECT id, email, first_name, last_name, created_at
            FROM buyers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(buyer)
    }

    /// Inserts a buyer.
    pub async fn insert(&self, buyer: &Buyer) -> DbResult<()> {
        debug!(id = %buyer.id, email = %buyer.email, "Inserting buyer");

        sqlx::query(
            r#"
            INSERT INTO buyers (id, email, first_name, last_name, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&buyer.id)
        .bind(&buyer.email)
        .bind(&buyer.first_name)
        .bind(&buyer.last_name)
        .bind(buyer.created_at)
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
    use crate::error::DbError;
    use crate::pool::Database;
    use chrono::Utc;

    fn buyer(id: &str, email: &str) -> Buyer {
        Buyer {
            id: id.to_string(),
            email: email.to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.buyers();

        repo.insert(&buyer("b-1", "ada@example.com")).await.unwrap();

        let found = repo.get_by_id("b-1").await.unwrap().unwrap();
        assert_eq!(found.email, "ada@example.com");
        assert_eq!(found.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.buyers();

        repo.insert(&buyer("b-1", "ada@example.com")).await.unwrap();
        let err = repo.insert(&buyer("b-2", "ada@example.com")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
