//! # Access Grant Gate
//!
//! Authorizes a buyer against a seller's wholesale program before anything
//! else runs. Read-only and side-effect free: a refused buyer leaves no
//! trace beyond a log line.

use tracing::debug;

use crate::error::{WholesaleError, WholesaleResult};
use vesta_core::WholesaleAccessGrant;
use vesta_db::GrantRepository;

/// Gate checking wholesale access grants.
#[derive(Debug, Clone)]
pub struct AccessGate {
    grants: GrantRepository,
}

impl AccessGate {
    /// Creates a new AccessGate.
    pub fn new(grants: GrantRepository) -> Self {
        AccessGate { grants }
    }

    /// Looks up the unique active grant for (buyer, seller).
    ///
    /// Any absent or revoked grant is a hard [`WholesaleError::NoAccess`];
    /// the engine never distinguishes "never invited" from "revoked" to
    /// callers.
    pub async fn check(
        &self,
        buyer_id: &str,
        seller_id: &str,
    ) -> WholesaleResult<WholesaleAccessGrant> {
        match self.grants.find_active(buyer_id, seller_id).await? {
            Some(grant) => {
                debug!(
                    buyer_id = %buyer_id,
                    seller_id = %seller_id,
                    grant_id = %grant.id,
                    "Wholesale access confirmed"
                );
                Ok(grant)
            }
            None => {
                debug!(
                    buyer_id = %buyer_id,
                    seller_id = %seller_id,
                    "Wholesale access refused: no active grant"
                );
                Err(WholesaleError::NoAccess {
                    buyer_id: buyer_id.to_string(),
                    seller_id: seller_id.to_string(),
                })
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vesta_core::{Buyer, GrantStatus};
    use vesta_db::Database;

    async fn setup() -> (Database, AccessGate) {
        let db = Database::in_memory().await.unwrap();
        db.buyers()
            .insert(&Buyer {
                id: "b-1".to_string(),
                email: "buyer@example.com".to_string(),
                first_name: None,
                last_name: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let gate = AccessGate::new(db.grants());
        (db, gate)
    }

    fn grant(status: GrantStatus) -> WholesaleAccessGrant {
        WholesaleAccessGrant {
            id: "g-1".to_string(),
            buyer_id: "b-1".to_string(),
            seller_id: "s-1".to_string(),
            status,
            pricing_tier: None,
            granted_at: Utc::now(),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_active_grant_passes() {
        let (db, gate) = setup().await;
        db.grants().insert(&grant(GrantStatus::Active)).await.unwrap();

        let found = gate.check("b-1", "s-1").await.unwrap();
        assert_eq!(found.id, "g-1");
    }

    #[tokio::test]
    async fn test_missing_grant_refused() {
        let (_db, gate) = setup().await;
        assert!(matches!(
            gate.check("b-1", "s-1").await.unwrap_err(),
            WholesaleError::NoAccess { .. }
        ));
    }

    #[tokio::test]
    async fn test_revoked_grant_refused() {
        let (db, gate) = setup().await;
        db.grants().insert(&grant(GrantStatus::Revoked)).await.unwrap();

        assert!(matches!(
            gate.check("b-1", "s-1").await.unwrap_err(),
            WholesaleError::NoAccess { .. }
        ));
    }

    #[tokio::test]
    async fn test_grant_for_other_seller_refused() {
        let (db, gate) = setup().await;
        db.grants().insert(&grant(GrantStatus::Active)).await.unwrap();

        assert!(matches!(
            gate.check("b-1", "s-2").await.unwrap_err(),
            WholesaleError::NoAccess { .. }
        ));
    }
}
