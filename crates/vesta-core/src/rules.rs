//! # Order Rules
//!
//! Pure rule checks for wholesale order validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Item resolution (engine crate)                                │
//! │  ├── Product exists and belongs to the seller                           │
//! │  └── Unit price resolved: override or catalog price                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule checks over resolved lines        │
//! │  ├── MOQ per line                                                       │
//! │  ├── Payment-terms membership                                           │
//! │  ├── Minimum order value                                                │
//! │  └── Deposit/balance split                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── CHECK constraints on money columns                                 │
//! │  └── Foreign key constraints                                            │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check runs; failures accumulate into one [`ValidationReport`] so a
//! buyer fixing their cart sees the complete picture, not one error at a
//! time.

use serde::{Deserialize, Serialize};

use crate::deposit::{split_deposit, DepositBreakdown};
use crate::error::ValidationError;
use crate::money::Money;
use crate::terms::DEFAULT_PAYMENT_TERMS;
use crate::types::SellerProgram;

// =============================================================================
// Resolved Line
// =============================================================================

/// An order line after product resolution: priced, named, and carrying the
/// MOQ it will be checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub product_id: String,
    pub name: String,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i64,
    /// Effective minimum order quantity (1 when the product has none).
    pub moq: i64,
    pub unit_price: Money,
}

impl ResolvedLine {
    /// Line subtotal (unit price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// One line that failed its minimum-order-quantity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoqFailure {
    pub product_id: String,
    pub product_name: String,
    pub required_quantity: i64,
    pub provided_quantity: i64,
}

/// The complete outcome of validating a wholesale order.
///
/// Structured enough for field-level client feedback: the MOQ failures name
/// products and quantities, the terms check echoes the allowed list, the
/// minimum check carries the shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True only when every check passed.
    pub valid: bool,
    /// Display strings, one per failed check.
    pub errors: Vec<String>,
    /// Non-fatal observations (e.g. a negotiated price override in effect).
    pub warnings: Vec<String>,
    /// Lines ordered below their minimum order quantity.
    pub items_failing_moq: Vec<MoqFailure>,
    /// Whether the requested payment terms are offered by the seller.
    pub payment_terms_valid: bool,
    /// The terms the seller offers, echoed back for client display.
    pub allowed_terms: Vec<String>,
    /// The seller's minimum order value, when configured.
    pub minimum_order_value: Option<Money>,
    /// `max(0, minimum - subtotal)`; zero when no minimum or minimum met.
    pub shortfall: Money,
    /// The order subtotal all checks ran against.
    pub total_value: Money,
    /// ISO currency code for every money field in this report.
    pub currency: String,
    /// Deposit/balance split at the seller's configured percentage.
    pub deposit: DepositBreakdown,
}

// =============================================================================
// Evaluation
// =============================================================================

/// Runs every order rule over resolved lines and assembles the report.
///
/// Checks never short-circuit: a cart can fail MOQ on two lines, request
/// unoffered terms, AND miss the order minimum, and the report says all of
/// it. Lines with non-positive quantities are recorded as failures and
/// contribute nothing to the subtotal.
///
/// ## Errors
/// Only argument-domain violations escape as hard errors (a misconfigured
/// deposit percentage above 100); rule failures land in the report.
pub fn evaluate_order(
    lines: &[ResolvedLine],
    requested_terms: &str,
    program: &SellerProgram,
) -> Result<ValidationReport, ValidationError> {
    let mut errors = Vec::new();
    let mut items_failing_moq = Vec::new();

    if lines.is_empty() {
        errors.push("order must contain at least one item".to_string());
    }

    // ---- MOQ + subtotal accumulation -------------------------------------
    let mut total_value = Money::zero();
    for line in lines {
        if line.quantity <= 0 {
            errors.push(format!(
                "{}: quantity must be positive, got {}",
                line.name, line.quantity
            ));
            items_failing_moq.push(MoqFailure {
                product_id: line.product_id.clone(),
                product_name: line.name.clone(),
                required_quantity: line.moq,
                provided_quantity: line.quantity,
            });
            continue;
        }

        if line.quantity < line.moq {
            errors.push(format!(
                "{}: quantity {} is below the minimum order quantity of {}",
                line.name, line.quantity, line.moq
            ));
            items_failing_moq.push(MoqFailure {
                product_id: line.product_id.clone(),
                product_name: line.name.clone(),
                required_quantity: line.moq,
                provided_quantity: line.quantity,
            });
        }

        if line.unit_price.is_negative() {
            errors.push(format!(
                "{}: unit price must not be negative, got {}",
                line.name, line.unit_price
            ));
            continue;
        }

        total_value += line.subtotal();
    }

    // ---- Payment terms ----------------------------------------------------
    let allowed_terms = if program.allowed_payment_terms.is_empty() {
        vec![DEFAULT_PAYMENT_TERMS.to_string()]
    } else {
        program.allowed_payment_terms.clone()
    };

    let payment_terms_valid = allowed_terms.iter().any(|t| t == requested_terms);
    if !payment_terms_valid {
        errors.push(format!(
            "payment terms '{}' are not offered by this seller (allowed: {})",
            requested_terms,
            allowed_terms.join(", ")
        ));
    }

    // ---- Minimum order value ----------------------------------------------
    let minimum_order_value = program.minimum_order_value();
    let shortfall = match minimum_order_value {
        Some(minimum) => total_value.shortfall_against(minimum),
        None => Money::zero(),
    };
    if !shortfall.is_zero() {
        errors.push(format!(
            "order total {} is below the seller's minimum order value of {} (short {})",
            total_value,
            minimum_order_value.unwrap_or_else(Money::zero),
            shortfall
        ));
    }

    // ---- Deposit split ----------------------------------------------------
    let deposit = split_deposit(total_value, program.deposit_percentage)?;

    let valid = errors.is_empty();

    Ok(ValidationReport {
        valid,
        errors,
        warnings: Vec::new(),
        items_failing_moq,
        payment_terms_valid,
        allowed_terms,
        minimum_order_value,
        shortfall,
        total_value,
        currency: program.currency.clone(),
        deposit,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
