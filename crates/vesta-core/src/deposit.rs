//! # Deposit/Balance Calculator
//!
//! Pure financial arithmetic for the deposit-then-balance payment structure
//! of wholesale orders.
//!
//! ## The Split Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  deposit + balance == order value, EXACTLY, for every input             │
//! │                                                                         │
//! │  order value: 10_001, deposit 30%                                       │
//! │     deposit = round_half_up(10_001 * 30 / 100) = 3_000                  │
//! │     balance = 10_001 - 3_000               = 7_001                      │
//! │                                                                         │
//! │  The balance is DERIVED from the rounded deposit. Rounding both         │
//! │  sides independently is how a cent goes missing between the deposit     │
//! │  invoice and the balance invoice.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is deterministic, synchronous, and I/O-free.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Breakdown Types
// =============================================================================

/// The result of splitting an order value into deposit and balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositBreakdown {
    /// Amount due at order time.
    pub deposit_amount: Money,
    /// Amount due later, per the order's payment terms.
    pub balance_amount: Money,
    /// The order value the split was computed from.
    pub order_value: Money,
    /// The percentage applied (0–100).
    pub deposit_percentage: u32,
}

/// The result of computing what remains after a deposit payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    /// Order value minus the deposit actually paid.
    pub balance_remaining: Money,
    /// Remaining share of the order value, 0.0–100.0. Display only;
    /// money stays in the exact integer fields.
    pub balance_percentage: f64,
}

// =============================================================================
// Calculator Functions
// =============================================================================

/// Splits an order value into deposit and balance amounts.
///
/// `deposit = round_half_up(value × percentage / 100)` in integer
/// arithmetic; `balance = value − deposit`, so the two always sum back to
/// the order value exactly.
///
/// ## Errors
/// - [`ValidationError::DepositPercentageOutOfRange`] when `percentage > 100`
/// - [`ValidationError::NegativeOrderValue`] when `order_value < 0`
///
/// ```rust
/// use vesta_core::deposit::split_deposit;
/// use vesta_core::money::Money;
///
/// let breakdown = split_deposit(Money::from_minor_units(1000), 30).unwrap();
/// assert_eq!(breakdown.deposit_amount.minor_units(), 300);
/// assert_eq!(breakdown.balance_amount.minor_units(), 700);
/// ```
pub fn split_deposit(
    order_value: Money,
    deposit_percentage: u32,
) -> Result<DepositBreakdown, ValidationError> {
    if deposit_percentage > 100 {
        return Err(ValidationError::DepositPercentageOutOfRange {
            percentage: deposit_percentage,
        });
    }

    if order_value.is_negative() {
        return Err(ValidationError::NegativeOrderValue {
            minor_units: order_value.minor_units(),
        });
    }

    let deposit_amount = order_value.percentage_of(deposit_percentage);
    let balance_amount = order_value - deposit_amount;

    Ok(DepositBreakdown {
        deposit_amount,
        balance_amount,
        order_value,
        deposit_percentage,
    })
}

/// Computes the balance remaining after a deposit payment.
///
/// ## Errors
/// - [`ValidationError::NegativeOrderValue`] when `order_value < 0`
/// - [`ValidationError::NegativeDepositPaid`] when `deposit_paid < 0`
/// - [`ValidationError::DepositExceedsOrderValue`] when `deposit_paid > order_value`
///
/// `balance_percentage` is `remaining / value × 100` as a display float,
/// defined as `0.0` for a zero-value order.
pub fn remaining_balance(
    order_value: Money,
    deposit_paid: Money,
) -> Result<BalanceBreakdown, ValidationError> {
    if order_value.is_negative() {
        return Err(ValidationError::NegativeOrderValue {
            minor_units: order_value.minor_units(),
        });
    }

    if deposit_paid.is_negative() {
        return Err(ValidationError::NegativeDepositPaid {
            minor_units: deposit_paid.minor_units(),
        });
    }

    if deposit_paid > order_value {
        return Err(ValidationError::DepositExceedsOrderValue {
            deposit_minor_units: deposit_paid.minor_units(),
            order_minor_units: order_value.minor_units(),
        });
    }

    let balance_remaining = order_value - deposit_paid;
    let balance_percentage = if order_value.is_zero() {
        0.0
    } else {
        balance_remaining.minor_units() as f64 / order_value.minor_units() as f64 * 100.0
    };

    Ok(BalanceBreakdown {
        balance_remaining,
        balance_percentage,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_deposit_basic() {
        let breakdown = split_deposit(Money::from_minor_units(1000), 30).unwrap();
        assert_eq!(breakdown.deposit_amount, Money::from_minor_units(300));
        assert_eq!(breakdown.balance_amount, Money::from_minor_units(700));
        assert_eq!(breakdown.order_value, Money::from_minor_units(1000));
        assert_eq!(breakdown.deposit_percentage, 30);
    }

    #[test]
    fn test_split_deposit_rounds_half_up() {
        // 10_001 * 30% = 3_000.3 → 3_000; balance picks up the odd unit
        let breakdown = split_deposit(Money::from_minor_units(10_001), 30).unwrap();
        assert_eq!(breakdown.deposit_amount.minor_units(), 3_000);
        assert_eq!(breakdown.balance_amount.minor_units(), 7_001);

        // 10 * 25% = 2.5 → 3
        let breakdown = split_deposit(Money::from_minor_units(10), 25).unwrap();
        assert_eq!(breakdown.deposit_amount.minor_units(), 3);
        assert_eq!(breakdown.balance_amount.minor_units(), 7);
    }

    #[test]
    fn test_split_deposit_boundaries() {
        let zero_pct = split_deposit(Money::from_minor_units(1000), 0).unwrap();
        assert_eq!(zero_pct.deposit_amount.minor_units(), 0);
        assert_eq!(zero_pct.balance_amount.minor_units(), 1000);

        let full_pct = split_deposit(Money::from_minor_units(1000), 100).unwrap();
        assert_eq!(full_pct.deposit_amount.minor_units(), 1000);
        assert_eq!(full_pct.balance_amount.minor_units(), 0);

        let zero_value = split_deposit(Money::zero(), 50).unwrap();
        assert_eq!(zero_value.deposit_amount.minor_units(), 0);
        assert_eq!(zero_value.balance_amount.minor_units(), 0);
    }

    #[test]
    fn test_split_deposit_rejects_bad_arguments() {
        assert_eq!(
            split_deposit(Money::from_minor_units(1000), 101).unwrap_err(),
            ValidationError::DepositPercentageOutOfRange { percentage: 101 }
        );
        assert_eq!(
            split_deposit(Money::from_minor_units(-100), 30).unwrap_err(),
            ValidationError::NegativeOrderValue { minor_units: -100 }
        );
    }

    /// The split invariant, exhaustively over small values and every
    /// percentage: deposit + balance reconstructs the order value exactly.
    #[test]
    fn test_split_invariant_exhaustive() {
        for value in 0..=1_000 {
            for pct in 0..=100 {
                let breakdown = split_deposit(Money::from_minor_units(value), pct).unwrap();
                assert_eq!(
                    breakdown.deposit_amount + breakdown.balance_amount,
                    Money::from_minor_units(value),
                    "split drifted at value={} pct={}",
                    value,
                    pct
                );
            }
        }
    }

    /// Same invariant at values that stress the i128 widening.
    #[test]
    fn test_split_invariant_large_values() {
        for value in [i64::MAX / 200, 1_000_000_000_000, 987_654_321_987] {
            for pct in [1, 33, 50, 99, 100] {
                let breakdown = split_deposit(Money::from_minor_units(value), pct).unwrap();
                assert_eq!(
                    (breakdown.deposit_amount + breakdown.balance_amount).minor_units(),
                    value
                );
            }
        }
    }

    #[test]
    fn test_remaining_balance_basic() {
        let breakdown =
            remaining_balance(Money::from_minor_units(1000), Money::from_minor_units(300)).unwrap();
        assert_eq!(breakdown.balance_remaining.minor_units(), 700);
        assert!((breakdown.balance_percentage - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_balance_fully_paid() {
        let breakdown =
            remaining_balance(Money::from_minor_units(1000), Money::from_minor_units(1000)).unwrap();
        assert!(breakdown.balance_remaining.is_zero());
        assert_eq!(breakdown.balance_percentage, 0.0);
    }

    #[test]
    fn test_remaining_balance_rejects_overpayment() {
        assert_eq!(
            remaining_balance(Money::from_minor_units(1000), Money::from_minor_units(1500))
                .unwrap_err(),
            ValidationError::DepositExceedsOrderValue {
                deposit_minor_units: 1500,
                order_minor_units: 1000,
            }
        );
    }

    #[test]
    fn test_remaining_balance_rejects_negatives() {
        assert!(matches!(
            remaining_balance(Money::from_minor_units(-1), Money::zero()),
            Err(ValidationError::NegativeOrderValue { .. })
        ));
        assert!(matches!(
            remaining_balance(Money::from_minor_units(100), Money::from_minor_units(-1)),
            Err(ValidationError::NegativeDepositPaid { .. })
        ));
    }

    #[test]
    fn test_remaining_balance_zero_order() {
        let breakdown = remaining_balance(Money::zero(), Money::zero()).unwrap();
        assert!(breakdown.balance_remaining.is_zero());
        assert_eq!(breakdown.balance_percentage, 0.0);
    }
}
