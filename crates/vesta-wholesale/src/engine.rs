//! # Order Placement Orchestrator
//!
//! The transactional core of the wholesale program.
//!
//! ## Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        place_order(input, buyer)                        │
//! │                                                                         │
//! │  1. Access gate        ── no active grant? abort, zero writes          │
//! │  2. Validate           ── resolve items, run all rule checks;           │
//! │                           invalid? abort with full report, zero writes  │
//! │  3. Deposit split      ── seller's percentage over the subtotal         │
//! │  4. Buyer snapshot     ── freeze email + display name                   │
//! │  5. Order number       ── WHS-{millis}-{base36}, retry on collision     │
//! │  6. ONE TRANSACTION    ── header + items + order_created event          │
//! │  7. Post-commit        ── spawned: cache invalidation + notifications   │
//! │                           (best-effort, never fails the order)          │
//! │                                                                         │
//! │  Failure at any step before 6 commits leaves the database untouched.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call is request-scoped: the engine holds no locks and keeps no
//! cross-request mutable state, so unrelated placements run concurrently.
//! Concurrent orders against the same product are NOT serialized here;
//! stock reservation belongs to the inventory subsystem.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::effects::{NullCache, NullNotifier, OrderCache, OrderNotifier, RedisCache, RedisNotifier};
use crate::error::{WholesaleError, WholesaleResult};
use crate::gate::AccessGate;
use crate::number::generate_order_number;
use crate::validator::{OrderItemRequest, OrderValidator};
use vesta_core::{
    Address, OrderStatus, ValidationReport, WholesaleOrder, WholesaleOrderEvent,
    WholesaleOrderItem, DEFAULT_PAYMENT_TERMS, ORDER_CREATED,
};
use vesta_db::{Database, DbConfig};

// =============================================================================
// Input / Output Types
// =============================================================================

/// A wholesale order submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderInput {
    pub seller_id: String,
    pub items: Vec<OrderItemRequest>,
    /// Requested payment terms; defaults to "Net 30" when omitted.
    pub payment_terms: Option<String>,
    /// Buyer's own purchase-order reference.
    pub po_number: Option<String>,
    pub shipping_address: Address,
    pub billing_address: Option<Address>,
}

/// A placed (or retrieved) order with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: WholesaleOrder,
    pub items: Vec<WholesaleOrderItem>,
}

// =============================================================================
// Engine
// =============================================================================

/// The wholesale order engine: gate → validator → atomic write → effects.
///
/// Cheap to clone and share across request handlers.
#[derive(Clone)]
pub struct WholesaleEngine {
    db: Database,
    gate: AccessGate,
    validator: OrderValidator,
    cache: Arc<dyn OrderCache>,
    notifier: Arc<dyn OrderNotifier>,
    order_number_attempts: u32,
}

impl WholesaleEngine {
    /// Creates an engine over an existing database and effect backends.
    pub fn new(
        db: Database,
        cache: Arc<dyn OrderCache>,
        notifier: Arc<dyn OrderNotifier>,
    ) -> Self {
        let gate = AccessGate::new(db.grants());
        let validator = OrderValidator::new(db.products());
        WholesaleEngine {
            db,
            gate,
            validator,
            cache,
            notifier,
            order_number_attempts: 3,
        }
    }

    /// Overrides how many order numbers a placement may try before giving
    /// up on unique-constraint collisions.
    pub fn order_number_attempts(mut self, attempts: u32) -> Self {
        self.order_number_attempts = attempts.max(1);
        self
    }

    /// Builds an engine from configuration: opens the database and, when a
    /// redis URL is configured, connects the cache/notifier backends.
    ///
    /// Effects are best-effort by contract, so an unreachable redis at
    /// startup degrades to no-op backends with a warning instead of
    /// refusing to serve orders.
    pub async fn connect(config: &EngineConfig) -> WholesaleResult<Self> {
        let db = Database::new(DbConfig::new(&config.database_path)).await?;

        let (cache, notifier): (Arc<dyn OrderCache>, Arc<dyn OrderNotifier>) =
            match &config.redis_url {
                Some(url) => {
                    let cache: Arc<dyn OrderCache> = match RedisCache::connect(url).await {
                        Ok(cache) => Arc::new(cache),
                        Err(e) => {
                            warn!(error = %e, "Redis cache unavailable, running with no-op cache");
                            Arc::new(NullCache)
                        }
                    };
                    let notifier: Arc<dyn OrderNotifier> = match RedisNotifier::connect(url).await {
                        Ok(notifier) => Arc::new(notifier),
                        Err(e) => {
                            warn!(error = %e, "Redis pub/sub unavailable, running with no-op notifier");
                            Arc::new(NullNotifier)
                        }
                    };
                    (cache, notifier)
                }
                None => (Arc::new(NullCache), Arc::new(NullNotifier)),
            };

        Ok(WholesaleEngine::new(db, cache, notifier))
    }

    /// The database handle, for callers composing further reads.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Validation (dry run)
    // -------------------------------------------------------------------------

    /// Validates an order without placing it. Read-only: storefronts call
    /// this for pre-submission feedback and nothing is written either way.
    pub async fn validate_order(
        &self,
        seller_id: &str,
        items: &[OrderItemRequest],
        payment_terms: Option<&str>,
    ) -> WholesaleResult<ValidationReport> {
        let program = self.db.programs().get_or_default(seller_id).await?;
        let requested_terms = payment_terms.unwrap_or(DEFAULT_PAYMENT_TERMS);

        let outcome = self
            .validator
            .validate(seller_id, items, requested_terms, &program)
            .await?;

        Ok(outcome.report)
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    /// Places a wholesale order for a buyer.
    ///
    /// Either returns a fully persisted order (header + items + creation
    /// event committed together) or an error with zero rows written. The
    /// returned order is always `pending`; later status transitions belong
    /// to the payment/fulfillment subsystem.
    pub async fn place_order(
        &self,
        input: PlaceOrderInput,
        buyer_id: &str,
    ) -> WholesaleResult<PlacedOrder> {
        // 1. Authorization; refusal writes nothing.
        let grant = self.gate.check(buyer_id, &input.seller_id).await?;

        // 2. Validation; an invalid order carries the complete report back.
        let program = self.db.programs().get_or_default(&input.seller_id).await?;
        let requested_terms = input
            .payment_terms
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_TERMS.to_string());

        let outcome = self
            .validator
            .validate(&input.seller_id, &input.items, &requested_terms, &program)
            .await?;

        if !outcome.report.valid {
            info!(
                buyer_id = %buyer_id,
                seller_id = %input.seller_id,
                errors = outcome.report.errors.len(),
                "Wholesale order rejected by validation"
            );
            return Err(WholesaleError::Rejected(outcome.report));
        }

        // 3. Deposit split already computed by validation, at the seller's
        //    configured percentage over the final subtotal.
        let deposit = outcome.report.deposit;

        // 4. Freeze the buyer contact snapshot.
        let buyer = self
            .db
            .buyers()
            .get_by_id(buyer_id)
            .await?
            .ok_or_else(|| WholesaleError::BuyerNotFound {
                buyer_id: buyer_id.to_string(),
            })?;

        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();

        let items: Vec<WholesaleOrderItem> = outcome
            .lines
            .iter()
            .map(|line| WholesaleOrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: line.product_id.clone(),
                name_snapshot: line.name.clone(),
                sku_snapshot: line.sku.clone(),
                image_snapshot: line.image_url.clone(),
                quantity: line.quantity,
                moq: line.moq,
                unit_price_minor_units: line.unit_price.minor_units(),
                subtotal_minor_units: line.subtotal().minor_units(),
                created_at: now,
            })
            .collect();

        // 5 + 6. Generate an order number and write the whole graph in one
        // transaction. Timestamp+random is not collision-proof, so the
        // UNIQUE constraint is the arbiter and a collision just means a
        // fresh number and another attempt.
        let mut attempt = 0;
        let order = loop {
            attempt += 1;

            let order = WholesaleOrder {
                id: order_id.clone(),
                order_number: generate_order_number(),
                seller_id: input.seller_id.clone(),
                buyer_id: buyer_id.to_string(),
                status: OrderStatus::Pending,
                subtotal_minor_units: outcome.report.total_value.minor_units(),
                deposit_amount_minor_units: deposit.deposit_amount.minor_units(),
                balance_amount_minor_units: deposit.balance_amount.minor_units(),
                deposit_percentage: deposit.deposit_percentage,
                payment_terms: requested_terms.clone(),
                po_number: input.po_number.clone(),
                currency: program.currency.clone(),
                buyer_email: buyer.email.clone(),
                buyer_name: buyer.display_name(),
                shipping_address: input.shipping_address.clone(),
                billing_address: input.billing_address.clone(),
                created_at: now,
            };

            let event = WholesaleOrderEvent {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                event_type: ORDER_CREATED.to_string(),
                description: format!(
                    "Wholesale order {} placed by {}",
                    order.order_number, order.buyer_name
                ),
                performed_by: buyer_id.to_string(),
                occurred_at: now,
            };

            match self.db.orders().insert_order_graph(&order, &items, &event).await {
                Ok(()) => break order,
                Err(e)
                    if e.is_unique_violation_on("order_number")
                        && attempt < self.order_number_attempts =>
                {
                    warn!(attempt, "Order number collision, regenerating");
                    continue;
                }
                Err(e) => return Err(WholesaleError::Persistence(e)),
            }
        };

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            buyer_id = %buyer_id,
            seller_id = %order.seller_id,
            grant_id = %grant.id,
            subtotal = order.subtotal_minor_units,
            deposit = order.deposit_amount_minor_units,
            "Wholesale order placed"
        );

        // 7. Best-effort effects, outside the transaction boundary.
        self.dispatch_post_commit(&order);

        Ok(PlacedOrder { order, items })
    }

    /// Spawns the post-commit effects for a freshly committed order.
    ///
    /// Runs detached from the request: failures are logged and swallowed,
    /// and both operations are idempotent so racing duplicates are
    /// harmless.
    fn dispatch_post_commit(&self, order: &WholesaleOrder) {
        let cache = Arc::clone(&self.cache);
        let notifier = Arc::clone(&self.notifier);
        let order = order.clone();

        tokio::spawn(async move {
            let prefixes = [
                format!("wholesale:orders:buyer:{}", order.buyer_id),
                format!("wholesale:orders:seller:{}", order.seller_id),
            ];
            for prefix in &prefixes {
                if let Err(e) = cache.invalidate_prefix(prefix).await {
                    warn!(error = %e, prefix = %prefix, "Cache invalidation failed after commit");
                }
            }

            let payload = serde_json::json!({
                "order_id": order.id,
                "order_number": order.order_number,
                "seller_id": order.seller_id,
                "buyer_id": order.buyer_id,
                "status": order.status,
                "subtotal_minor_units": order.subtotal_minor_units,
                "deposit_amount_minor_units": order.deposit_amount_minor_units,
                "balance_amount_minor_units": order.balance_amount_minor_units,
                "currency": order.currency,
            });

            let channels = [
                format!("buyer:{}", order.buyer_id),
                format!("seller:{}", order.seller_id),
            ];
            for channel in &channels {
                if let Err(e) = notifier
                    .publish(channel, "wholesale_order_created", payload.clone())
                    .await
                {
                    warn!(error = %e, channel = %channel, "Notification publish failed after commit");
                }
            }
        });
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Fetches an order with its items.
    pub async fn get_order(&self, order_id: &str) -> WholesaleResult<PlacedOrder> {
        let order = self
            .db
            .orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| WholesaleError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;
        let items = self.db.orders().get_items(order_id).await?;

        Ok(PlacedOrder { order, items })
    }

    /// A buyer's order history, newest first.
    pub async fn list_orders_for_buyer(
        &self,
        buyer_id: &str,
        limit: u32,
    ) -> WholesaleResult<Vec<WholesaleOrder>> {
        Ok(self.db.orders().list_for_buyer(buyer_id, limit).await?)
    }

    /// A seller's incoming orders, newest first.
    pub async fn list_orders_for_seller(
        &self,
        seller_id: &str,
        limit: u32,
    ) -> WholesaleResult<Vec<WholesaleOrder>> {
        Ok(self.db.orders().list_for_seller(seller_id, limit).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
