//! # Error Types
//!
//! Domain-specific error types for vesta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vesta-core errors (this file)                                         │
//! │  ├── ValidationError    - Financial argument violations                │
//! │  └── UnknownTermsError  - Unparseable payment terms                    │
//! │                                                                         │
//! │  vesta-db errors (separate crate)                                      │
//! │  └── DbError            - Database operation failures                  │
//! │                                                                         │
//! │  vesta-wholesale errors (separate crate)                               │
//! │  └── WholesaleError     - What API callers see                         │
//! │                                                                         │
//! │  Flow: ValidationError → WholesaleError → caller                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, percentages)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Violations of the financial argument contracts.
///
/// Raised by the deposit/balance calculator and by rule checks when an
/// argument falls outside its documented domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Deposit percentage must be within 0–100.
    #[error("deposit percentage must be between 0 and 100, got {percentage}")]
    DepositPercentageOutOfRange { percentage: u32 },

    /// Order values are never negative.
    #[error("order value must not be negative, got {minor_units}")]
    NegativeOrderValue { minor_units: i64 },

    /// A paid deposit can never exceed the order it was paid against.
    #[error("deposit paid ({deposit_minor_units}) exceeds order value ({order_minor_units})")]
    DepositExceedsOrderValue {
        deposit_minor_units: i64,
        order_minor_units: i64,
    },

    /// Deposit amounts are never negative.
    #[error("deposit paid must not be negative, got {minor_units}")]
    NegativeDepositPaid { minor_units: i64 },
}

// =============================================================================
// Unknown Terms Error
// =============================================================================

/// A payment-terms string that is neither `"Immediate"` nor `"Net N"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment terms: '{terms}'")]
pub struct UnknownTermsError {
    /// The string exactly as the caller supplied it.
    pub terms: String,
}

impl UnknownTermsError {
    pub fn new(terms: impl Into<String>) -> Self {
        UnknownTermsError { terms: terms.into() }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::DepositPercentageOutOfRange { percentage: 101 };
        assert_eq!(
            err.to_string(),
            "deposit percentage must be between 0 and 100, got 101"
        );

        let err = ValidationError::NegativeOrderValue { minor_units: -100 };
        assert_eq!(err.to_string(), "order value must not be negative, got -100");
    }

    #[test]
    fn test_unknown_terms_message() {
        let err = UnknownTermsError::new("Net Thirty");
        assert_eq!(err.to_string(), "unknown payment terms: 'Net Thirty'");
    }
}
