//! # vesta-core: Pure Business Logic for the Wholesale Order Engine
//!
//! This crate is the **heart** of the wholesale subsystem. It contains the
//! financial arithmetic and order rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vesta Wholesale Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  vesta-wholesale (engine)                       │   │
//! │  │   access gate ──► item resolution ──► placement ──► effects     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vesta-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  deposit  │  │   rules   │  │   │
//! │  │   │  Product  │  │   Money   │  │  split    │  │  MOQ      │  │   │
//! │  │   │   Order   │  │  minor    │  │  balance  │  │  terms    │  │   │
//! │  │   │   Grant   │  │  units    │  │  due date │  │  minimum  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vesta-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, WholesaleOrder, AccessGrant, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`deposit`] - Deposit/balance split and remaining-balance math
//! - [`terms`] - Payment-terms parsing and due-date calculation
//! - [`rules`] - Accumulating order-rule checks and the validation report
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input, same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are minor units (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vesta_core::deposit::split_deposit;
//! use vesta_core::money::Money;
//!
//! let breakdown = split_deposit(Money::from_minor_units(10_000), 30).unwrap();
//! assert_eq!(breakdown.deposit_amount.minor_units(), 3_000);
//! assert_eq!(breakdown.balance_amount.minor_units(), 7_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod deposit;
pub mod error;
pub mod money;
pub mod rules;
pub mod terms;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vesta_core::Money` instead of
// `use vesta_core::money::Money`

pub use deposit::{remaining_balance, split_deposit, BalanceBreakdown, DepositBreakdown};
pub use error::{UnknownTermsError, ValidationError};
pub use money::Money;
pub use rules::{evaluate_order, MoqFailure, ResolvedLine, ValidationReport};
pub use terms::{payment_due_date, PaymentTerms, DEFAULT_PAYMENT_TERMS};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// ISO currency code used when neither seller program nor caller specifies
/// one. Wholesale money is always (integer minor units, currency code).
pub const DEFAULT_CURRENCY: &str = "USD";

/// Prefix of every wholesale order number.
pub const ORDER_NUMBER_PREFIX: &str = "WHS";
