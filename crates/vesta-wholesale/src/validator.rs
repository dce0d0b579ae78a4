//! # Order Rules Validator
//!
//! Resolves requested items against the seller's catalog, then composes the
//! pure rule checks from vesta-core into one accumulated report.
//!
//! ## Two Failure Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HARD ERRORS (abort validation)                                         │
//! │  ├── ProductNotFound  - the line cannot be priced at all                │
//! │  └── ForeignProduct   - product belongs to a different seller           │
//! │                                                                         │
//! │  ACCUMULATED FAILURES (all recorded, nothing short-circuits)            │
//! │  ├── quantity below MOQ          → items_failing_moq                    │
//! │  ├── terms not offered           → allowed_terms echoed back            │
//! │  └── subtotal below minimum      → shortfall                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The validator is read-only: it can be run standalone as a pre-submission
//! dry run with no side effects.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{WholesaleError, WholesaleResult};
use vesta_core::{evaluate_order, Money, ResolvedLine, SellerProgram, ValidationReport};
use vesta_db::ProductRepository;

// =============================================================================
// Request / Outcome Types
// =============================================================================

/// One requested order line, as submitted by the buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
    /// Negotiated unit price in minor units, when the caller overrides the
    /// catalog price (tiered pricing, one-off deals).
    pub unit_price_override: Option<i64>,
}

/// Everything validation produced: the report for the caller, plus the
/// resolved lines the placement step snapshots into item rows.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub report: ValidationReport,
    pub lines: Vec<ResolvedLine>,
}

// =============================================================================
// Validator
// =============================================================================

/// Composes item resolution with the pure order-rule checks.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    products: ProductRepository,
}

impl OrderValidator {
    /// Creates a new OrderValidator.
    pub fn new(products: ProductRepository) -> Self {
        OrderValidator { products }
    }

    /// Validates a wholesale order request against a seller's program.
    ///
    /// Item resolution failures (`ProductNotFound`, `ForeignProduct`) are
    /// hard errors; everything else accumulates into the report. A price
    /// override that differs from the catalog price is recorded as a
    /// warning so sellers can audit negotiated pricing.
    pub async fn validate(
        &self,
        seller_id: &str,
        items: &[OrderItemRequest],
        requested_terms: &str,
        program: &SellerProgram,
    ) -> WholesaleResult<ValidationOutcome> {
        let mut lines = Vec::with_capacity(items.len());
        let mut warnings = Vec::new();

        for request in items {
            let product = self
                .products
                .get_by_id(&request.product_id)
                .await?
                .ok_or_else(|| WholesaleError::ProductNotFound {
                    product_id: request.product_id.clone(),
                })?;

            if product.seller_id != seller_id {
                return Err(WholesaleError::ForeignProduct {
                    product_id: product.id,
                    seller_id: seller_id.to_string(),
                });
            }

            let unit_price = match request.unit_price_override {
                Some(override_units) => {
                    if override_units != product.price_minor_units {
                        warnings.push(format!(
                            "{}: negotiated unit price {} overrides catalog price {}",
                            product.name,
                            Money::from_minor_units(override_units),
                            product.price()
                        ));
                    }
                    Money::from_minor_units(override_units)
                }
                None => product.price(),
            };

            lines.push(ResolvedLine {
                product_id: product.id,
                name: product.name,
                sku: product.sku,
                image_url: product.image_url,
                quantity: request.quantity,
                moq: product.moq.unwrap_or(1),
                unit_price,
            });
        }

        let mut report = evaluate_order(&lines, requested_terms, program)?;
        report.warnings = warnings;

        debug!(
            seller_id = %seller_id,
            valid = report.valid,
            errors = report.errors.len(),
            subtotal = report.total_value.minor_units(),
            "Order validated"
        );

        Ok(ValidationOutcome { report, lines })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
