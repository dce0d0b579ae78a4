//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A wholesale order of $18,499.99 split 30/70 must reconcile to the      │
//! │  cent, or the deposit invoice and the balance invoice disagree with     │
//! │  the order total.                                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    1_849_999 minor units, split exactly; the balance is DERIVED         │
//! │    (total - deposit), never rounded on its own.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vesta_core::money::Money;
//!
//! let subtotal = Money::from_minor_units(1099); // $10.99
//! let doubled = subtotal * 2;                   // $21.98
//! ```
//!
//! The ISO currency code travels beside amounts (see
//! [`DEFAULT_CURRENCY`](crate::DEFAULT_CURRENCY)), never inside `Money`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative intermediate values so shortfall and
///   balance math can be validated rather than silently clamped
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Serde-transparent**: serializes as a bare integer for API payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ```rust
    /// use vesta_core::money::Money;
    ///
    /// let price = Money::from_minor_units(1099); // $10.99
    /// assert_eq!(price.minor_units(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Saturating shortfall against a required minimum: `max(0, min - self)`.
    ///
    /// ```rust
    /// use vesta_core::money::Money;
    ///
    /// let subtotal = Money::from_minor_units(7_500);
    /// let minimum = Money::from_minor_units(10_000);
    /// assert_eq!(subtotal.shortfall_against(minimum).minor_units(), 2_500);
    /// assert!(minimum.shortfall_against(subtotal).is_zero());
    /// ```
    #[inline]
    pub const fn shortfall_against(&self, minimum: Money) -> Money {
        let diff = minimum.0 - self.0;
        if diff > 0 {
            Money(diff)
        } else {
            Money(0)
        }
    }

    /// Applies a whole percentage with round-half-up, in integer arithmetic.
    ///
    /// Uses i128 internally so large order values cannot overflow.
    /// The formula `(units * pct + 50) / 100` rounds exact halves up, the
    /// convention used for deposit invoices platform-wide.
    ///
    /// ```rust
    /// use vesta_core::money::Money;
    ///
    /// let value = Money::from_minor_units(1_000);
    /// assert_eq!(value.percentage_of(30).minor_units(), 300);
    /// // 15 * 35% = 5.25 → rounds down to 5; 10 * 35% = 3.5 → rounds up to 4
    /// assert_eq!(Money::from_minor_units(15).percentage_of(35).minor_units(), 5);
    /// assert_eq!(Money::from_minor_units(10).percentage_of(35).minor_units(), 4);
    /// ```
    pub fn percentage_of(&self, percentage: u32) -> Money {
        let scaled = (self.0 as i128 * percentage as i128 + 50) / 100;
        Money(scaled as i64)
    }

    /// Multiplies money by a quantity (line subtotals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display: `1234 → "12.34"`, `-550 → "-5.50"`.
///
/// UI layers own real currency formatting and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
