//! # Engine Error Types
//!
//! The error taxonomy API callers see.
//!
//! ## Propagation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NoAccess / ProductNotFound / ForeignProduct / Rejected                  │
//! │     → returned synchronously, structured enough for field-level UI       │
//! │                                                                          │
//! │  Persistence                                                             │
//! │     → opaque to callers: the transaction rolled back, nothing exists,    │
//! │       no partial order id ever leaks; detail stays in logs via #[source] │
//! │                                                                          │
//! │  Cache / notification failures                                           │
//! │     → never appear here at all; they are logged and swallowed inside     │
//! │       the post-commit effects (see effects module)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use vesta_core::{UnknownTermsError, ValidationError, ValidationReport};
use vesta_db::DbError;

/// Errors surfaced by the wholesale order engine.
#[derive(Debug, Error)]
pub enum WholesaleError {
    /// No active wholesale access grant connects this buyer to this seller.
    #[error("buyer {buyer_id} has no wholesale access with seller {seller_id}")]
    NoAccess { buyer_id: String, seller_id: String },

    /// A requested product does not exist.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// A requested product exists but belongs to a different seller.
    #[error("product {product_id} does not belong to seller {seller_id}")]
    ForeignProduct {
        product_id: String,
        seller_id: String,
    },

    /// The buyer account could not be resolved for the order snapshot.
    #[error("buyer not found: {buyer_id}")]
    BuyerNotFound { buyer_id: String },

    /// The requested order does not exist.
    #[error("order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Order rules failed; the report carries the complete per-check detail
    /// (MOQ failures, allowed terms, shortfall) for client display.
    #[error("order failed validation: {}", .0.errors.join("; "))]
    Rejected(ValidationReport),

    /// Payment terms string that is neither "Immediate" nor "Net N".
    #[error(transparent)]
    UnknownTerms(#[from] UnknownTermsError),

    /// A financial argument fell outside its domain (misconfigured deposit
    /// percentage, negative order value).
    #[error(transparent)]
    Calculation(#[from] ValidationError),

    /// The order transaction failed and rolled back. Deliberately opaque:
    /// no order identifier exists to leak.
    #[error("order could not be persisted")]
    Persistence(#[source] DbError),
}

impl WholesaleError {
    /// The validation report carried by a [`WholesaleError::Rejected`].
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            WholesaleError::Rejected(report) => Some(report),
            _ => None,
        }
    }
}

impl From<DbError> for WholesaleError {
    fn from(err: DbError) -> Self {
        WholesaleError::Persistence(err)
    }
}

/// Result type for engine operations.
pub type WholesaleResult<T> = Result<T, WholesaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_display_is_opaque() {
        let err = WholesaleError::Persistence(DbError::QueryFailed(
            "UNIQUE constraint failed: wholesale_orders.id=o-123".to_string(),
        ));
        // Callers see a generic message; the detail lives behind #[source].
        assert_eq!(err.to_string(), "order could not be persisted");
    }

    #[test]
    fn test_no_access_names_both_parties() {
        let err = WholesaleError::NoAccess {
            buyer_id: "b-1".to_string(),
            seller_id: "s-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "buyer b-1 has no wholesale access with seller s-1"
        );
    }
}
