//! # Domain Types
//!
//! Core domain types for the wholesale order engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │     Product      │  │ WholesaleOrder   │  │ WholesaleOrderItem   │  │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────────  │  │
//! │  │  id (UUID)       │  │  id (UUID)       │  │  id (UUID)           │  │
//! │  │  seller_id       │  │  order_number    │  │  order_id (FK)       │  │
//! │  │  price_minor_... │  │  status          │  │  name/sku snapshots  │  │
//! │  │  moq (optional)  │  │  deposit/balance │  │  quantity, moq       │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │ AccessGrant      │  │  SellerProgram   │  │ WholesaleOrderEvent  │  │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────────  │  │
//! │  │  buyer ↔ seller  │  │  deposit %       │  │  append-only audit   │  │
//! │  │  active/revoked  │  │  min order value │  │  order_created, ...  │  │
//! │  │  pricing tier    │  │  allowed terms   │  │                      │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry both:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `order_number`: human-readable business id (`WHS-...`), unique

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Event type written exactly once per placed order.
pub const ORDER_CREATED: &str = "order_created";

// =============================================================================
// Product
// =============================================================================

/// A catalog product owned by a seller.
///
/// The engine reads products to price and snapshot order lines; catalog
/// management itself lives elsewhere in the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Seller that owns this product.
    pub seller_id: String,

    /// Display name shown to buyers and frozen onto order lines.
    pub name: String,

    /// Stock Keeping Unit - business identifier, if the seller assigns one.
    pub sku: Option<String>,

    /// Primary product image URL.
    pub image_url: Option<String>,

    /// Price in minor currency units (cents for USD).
    pub price_minor_units: i64,

    /// Minimum order quantity for wholesale buyers, if configured.
    pub moq: Option<i64>,

    /// ISO currency code the price is denominated in.
    pub currency: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the catalog price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor_units(self.price_minor_units)
    }

    /// The minimum quantity a wholesale buyer may order.
    ///
    /// Defaults to 1 when no per-product MOQ is configured, so an
    /// unconfigured catalog imposes no quantity floor.
    #[inline]
    pub fn effective_moq(&self) -> i64 {
        self.moq.unwrap_or(1)
    }
}

// =============================================================================
// Buyer
// =============================================================================

/// A wholesale buyer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Buyer {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Buyer {
    /// Display name frozen onto orders: `"First Last"` trimmed, falling
    /// back to the email when no name parts are on file.
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

// =============================================================================
// Access Grant
// =============================================================================

/// Lifecycle state of a wholesale access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    /// Buyer may place wholesale orders with the seller.
    Active,
    /// Access withdrawn; any placement attempt is refused.
    Revoked,
}

/// Authorization record permitting a buyer to order wholesale from a seller.
///
/// Created when a buyer accepts a seller's invitation (owned by the
/// invitation subsystem); read-only to this engine. At most one active
/// grant exists per (buyer, seller) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WholesaleAccessGrant {
    pub id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub status: GrantStatus,
    /// Pricing tier negotiated at invitation time, if any.
    pub pricing_tier: Option<String>,
    pub granted_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Seller Program
// =============================================================================

/// Per-seller wholesale program configuration.
///
/// Everything here has a sensible default so a seller who never touched
/// their wholesale settings still gets a working program: no deposit, no
/// minimum, `"Net 30"` terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SellerProgram {
    pub seller_id: String,

    /// Deposit due at order time, as a whole percentage (0-100).
    pub deposit_percentage: u32,

    /// Minimum order subtotal, in minor units, if the seller sets a floor.
    pub minimum_order_value_minor_units: Option<i64>,

    /// Payment terms the seller offers, canonical strings ("Net 30", ...).
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub allowed_payment_terms: Vec<String>,

    /// ISO currency code for this seller's wholesale program.
    pub currency: String,
}

impl SellerProgram {
    /// The program an unconfigured seller runs under.
    pub fn defaults(seller_id: impl Into<String>) -> Self {
        SellerProgram {
            seller_id: seller_id.into(),
            deposit_percentage: 0,
            minimum_order_value_minor_units: None,
            allowed_payment_terms: vec![crate::terms::DEFAULT_PAYMENT_TERMS.to_string()],
            currency: crate::DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Minimum order value as Money, when configured.
    #[inline]
    pub fn minimum_order_value(&self) -> Option<Money> {
        self.minimum_order_value_minor_units.map(Money::from_minor_units)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a wholesale order.
///
/// This engine only ever writes [`OrderStatus::Pending`]; the payment and
/// fulfillment subsystem owns every later transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, deposit not yet captured.
    Pending,
    /// Deposit captured.
    DepositPaid,
    /// Balance invoiced and awaiting payment.
    BalanceDue,
    /// Deposit and balance both captured.
    FullyPaid,
    /// Order cancelled.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Address
// =============================================================================

/// A shipping or billing address, stored as a JSON column on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
}

// =============================================================================
// Wholesale Order
// =============================================================================

/// A placed wholesale order header.
///
/// Money invariants for every persisted order:
/// - `subtotal == Σ item.subtotal`
/// - `deposit_amount + balance_amount == subtotal` exactly
/// - `0 <= deposit_percentage <= 100`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WholesaleOrder {
    pub id: String,
    /// Human-readable business id, unique: `WHS-{millis}-{base36}`.
    pub order_number: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub status: OrderStatus,
    pub subtotal_minor_units: i64,
    pub deposit_amount_minor_units: i64,
    pub balance_amount_minor_units: i64,
    /// Deposit percentage the split was computed with (0-100).
    pub deposit_percentage: u32,
    /// Canonical payment terms string ("Net 30", "Immediate").
    pub payment_terms: String,
    /// Buyer's purchase-order reference, if supplied.
    pub po_number: Option<String>,
    pub currency: String,
    /// Buyer contact email at order time (frozen).
    pub buyer_email: String,
    /// Buyer display name at order time (frozen).
    pub buyer_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub shipping_address: Address,
    #[cfg_attr(feature = "sqlx", sqlx(json(nullable)))]
    pub billing_address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl WholesaleOrder {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor_units(self.subtotal_minor_units)
    }

    #[inline]
    pub fn deposit_amount(&self) -> Money {
        Money::from_minor_units(self.deposit_amount_minor_units)
    }

    #[inline]
    pub fn balance_amount(&self) -> Money {
        Money::from_minor_units(self.balance_amount_minor_units)
    }
}

// =============================================================================
// Wholesale Order Item
// =============================================================================

/// A line item on a wholesale order.
/// Uses snapshot pattern to freeze product data at time of order:
/// catalog edits after placement must never alter order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WholesaleOrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at time of order (frozen).
    pub name_snapshot: String,
    /// SKU at time of order (frozen).
    pub sku_snapshot: Option<String>,
    /// Image URL at time of order (frozen).
    pub image_snapshot: Option<String>,
    /// Quantity ordered.
    pub quantity: i64,
    /// The MOQ the line was validated against (frozen).
    pub moq: i64,
    /// Unit price in minor units at time of order (frozen).
    pub unit_price_minor_units: i64,
    /// Line subtotal (unit_price × quantity).
    pub subtotal_minor_units: i64,
    pub created_at: DateTime<Utc>,
}

impl WholesaleOrderItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor_units(self.unit_price_minor_units)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor_units(self.subtotal_minor_units)
    }
}

// =============================================================================
// Wholesale Order Event
// =============================================================================

/// An append-only audit event on a wholesale order.
///
/// The placement engine writes exactly one [`ORDER_CREATED`] event per
/// order, in the same transaction as the order itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WholesaleOrderEvent {
    pub id: String,
    pub order_id: String,
    /// Machine-readable event kind ("order_created", ...).
    pub event_type: String,
    /// Human-readable description for seller dashboards.
    pub description: String,
    /// Actor id, usually the buyer who placed the order.
    pub performed_by: String,
    pub occurred_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
