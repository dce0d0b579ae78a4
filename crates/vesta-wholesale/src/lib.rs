//! # vesta-wholesale: Order Validation + Placement Engine
//!
//! The transactional core of the Vesta wholesale program. Sellers approve
//! wholesale buyers through access grants; approved buyers place orders
//! under negotiated terms with a deposit due up front and the balance due
//! per payment terms.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   gate ──► item resolution ──► validator (──► calculator)               │
//! │     │                              │                                    │
//! │     │ no grant                     │ invalid                            │
//! │     ▼                              ▼                                    │
//! │   NoAccess, no writes          Rejected(report), no writes              │
//! │                                                                         │
//! │   valid ──► atomic write (header + items + event) ──► post-commit       │
//! │                                                       effects           │
//! │                                                       (best-effort)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Entry Points
//!
//! - [`WholesaleEngine::place_order`] - the all-or-nothing placement path
//! - [`WholesaleEngine::validate_order`] - read-only dry run
//! - [`vesta_core::split_deposit`] / [`vesta_core::remaining_balance`] /
//!   [`vesta_core::payment_due_date`] - pure calculators, re-exported here
//!
//! ## Guarantees
//!
//! - A failed authorization or validation writes nothing.
//! - A failed transaction writes nothing and leaks no order identifier.
//! - A failed post-commit effect leaves a fully valid order that may simply
//!   be slow to appear in caches and real-time feeds.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod gate;
pub mod number;
pub mod validator;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, EngineConfig};
pub use effects::{NullCache, NullNotifier, OrderCache, OrderNotifier, RedisCache, RedisNotifier};
pub use engine::{PlaceOrderInput, PlacedOrder, WholesaleEngine};
pub use error::{WholesaleError, WholesaleResult};
pub use gate::AccessGate;
pub use number::generate_order_number;
pub use validator::{OrderItemRequest, OrderValidator, ValidationOutcome};

// The pure calculators are part of this engine's public surface.
pub use vesta_core::{
    payment_due_date, remaining_balance, split_deposit, BalanceBreakdown, DepositBreakdown,
    Money, PaymentTerms, ValidationReport,
};
