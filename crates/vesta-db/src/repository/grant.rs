//! # Access Grant Repository
//!
//! Wholesale access grants: the authorization records connecting approved
//! buyers to sellers. Grants are created by the invitation subsystem when a
//! buyer accepts; the placement engine only ever reads the active one.
//!
//! A partial unique index in the schema guarantees at most one active grant
//! per (buyer, seller) pair, so `find_active` can use `fetch_optional`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vesta_core::WholesaleAccessGrant;

/// Repository for wholesale access grants.
#[derive(Debug, Clone)]
pub struct GrantRepository {
    pool: SqlitePool,
}

impl GrantRepository {
    /// Creates a new GrantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GrantRepository { pool }
    }

    /// Finds the unique active grant for a (buyer, seller) pair.
    ///
    /// Revoked grants never match; `None` means the buyer has no wholesale
    /// access with this seller.
    pub async fn find_active(
        &self,
        buyer_id: &str,
        seller_id: &str,
    ) -> DbResult<Option<WholesaleAccessGrant>> {
        let grant = sqlx::query_as::<_, WholesaleAccessGrant>(
            r#"
            SELECT id, buyer_id, seller_id, status, pricing_tier, granted_at, revoked_at
            FROM wholesale_access_grants
            WHERE buyer_id = ?1 AND seller_id = ?2 AND status = 'active'
            "#,
        )
        .bind(buyer_id)
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grant)
    }

    /// Inserts a grant (invitation acceptance path; also used by seeding
    /// and tests).
    pub async fn insert(&self, grant: &WholesaleAccessGrant) -> DbResult<()> {
        debug!(
            buyer_id = %grant.buyer_id,
            seller_id = %grant.seller_id,
            "Inserting access grant"
        );

        sqlx::query(
            r#"
            INSERT INTO wholesale_access_grants (
                id, buyer_id, seller_id, status, pricing_tier, granted_at, revoked_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&grant.id)
        .bind(&grant.buyer_id)
        .bind(&grant.seller_id)
        .bind(grant.status)
        .bind(&grant.pricing_tier)
        .bind(grant.granted_at)
        .bind(grant.revoked_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Revokes a grant by id, stamping the revocation time.
    pub async fn revoke(&self, grant_id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE wholesale_access_grants
            SET status = 'revoked', revoked_at = ?2
            WHERE id = ?1 AND status = 'active'
            "#,
        )
        .bind(grant_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Grant (active)", grant_id));
        }

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
    use vesta_core::{Buyer, GrantStatus};

    async fn seed_buyer(db: &Database, id: &str) {
        db.buyers()
            .insert(&Buyer {
                id: id.to_string(),
                email: format!("{id}@example.com"),
                first_name: None,
                last_name: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    fn grant(id: &str, buyer_id: &str, seller_id: &str, status: GrantStatus) -> WholesaleAccessGrant {
        WholesaleAccessGrant {
            id: id.to_string(),
            buyer_id: buyer_id.to_string(),
            seller_id: seller_id.to_string(),
            status,
            pricing_tier: None,
            granted_at: Utc::now(),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_active_matches_only_active() {
        let db = Database::in_memory().await.unwrap();
        seed_buyer(&db, "b-1").await;
        let repo = db.grants();

        repo.insert(&grant("g-1", "b-1", "s-1", GrantStatus::Revoked))
            .await
            .unwrap();
        assert!(repo.find_active("b-1", "s-1").await.unwrap().is_none());

        repo.insert(&grant("g-2", "b-1", "s-1", GrantStatus::Active))
            .await
            .unwrap();
        let found = repo.find_active("b-1", "s-1").await.unwrap().unwrap();
        assert_eq!(found.id, "g-2");
    }

    #[tokio::test]
    async fn test_second_active_grant_rejected_by_schema() {
        let db = Database::in_memory().await.unwrap();
        seed_buyer(&db, "b-1").await;
        let repo = db.grants();

        repo.insert(&grant("g-1", "b-1", "s-1", GrantStatus::Active))
            .await
            .unwrap();
        let err = repo
            .insert(&grant("g-2", "b-1", "s-1", GrantStatus::Active))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_revoke_then_no_active_grant() {
        let db = Database::in_memory().await.unwrap();
        seed_buyer(&db, "b-1").await;
        let repo = db.grants();

        repo.insert(&grant("g-1", "b-1", "s-1", GrantStatus::Active))
            .await
            .unwrap();
        repo.revoke("g-1").await.unwrap();

        assert!(repo.find_active("b-1", "s-1").await.unwrap().is_none());

        // Revoking again is a not-found: the active row is gone.
        assert!(matches!(
            repo.revoke("g-1").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
