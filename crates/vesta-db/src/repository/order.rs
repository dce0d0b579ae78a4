//! # Order Repository
//!
//! Wholesale order persistence.
//!
//! ## The Atomic Order Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 insert_order_graph (ONE transaction)                    │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT wholesale_orders        (1 header row)                        │
//! │    INSERT wholesale_order_items   (N item rows)                         │
//! │    INSERT wholesale_order_events  (exactly 1 "order_created" row)       │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure anywhere → ROLLBACK → zero rows in all three tables.       │
//! │  A header with no items, or an order with no audit trail, can never     │
//! │  exist.                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vesta_core::{WholesaleOrder, WholesaleOrderEvent, WholesaleOrderItem};

/// Repository for wholesale order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order header, its items, and its creation event in a
    /// single transaction.
    ///
    /// Dropping the transaction on any error rolls everything back; the
    /// caller either gets `Ok` and a fully persisted order or an error and
    /// an untouched database.
    pub async fn insert_order_graph(
        &self,
        order: &WholesaleOrder,
        items: &[WholesaleOrderItem],
        event: &WholesaleOrderEvent,
    ) -> DbResult<()> {
        debug!(
            id = %order.id,
            order_number = %order.order_number,
            items = items.len(),
            "Inserting wholesale order graph"
        );

        let shipping_json = serde_json::to_string(&order.shipping_address)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let billing_json = order
            .billing_address
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO wholesale_orders (
                id, order_number, seller_id, buyer_id, status,
                subtotal_minor_units, deposit_amount_minor_units,
                balance_amount_minor_units, deposit_percentage,
                payment_terms, po_number, currency,
                buyer_email, buyer_name,
                shipping_address, billing_address, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9,
                ?10, ?11, ?12,
                ?13, ?14,
                ?15, ?16, ?17
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(&order.seller_id)
        .bind(&order.buyer_id)
        .bind(order.status)
        .bind(order.subtotal_minor_units)
        .bind(order.deposit_amount_minor_units)
        .bind(order.balance_amount_minor_units)
        .bind(order.deposit_percentage)
        .bind(&order.payment_terms)
        .bind(&order.po_number)
        .bind(&order.currency)
        .bind(&order.buyer_email)
        .bind(&order.buyer_name)
        .bind(shipping_json)
        .bind(billing_json)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO wholesale_order_items (
                    id, order_id, product_id,
                    name_snapshot, sku_snapshot, image_snapshot,
                    quantity, moq, unit_price_minor_units,
                    subtotal_minor_units, created_at
                ) VALUES (
                    ?1, ?2, ?3,
                    ?4, ?5, ?6,
                    ?7, ?8, ?9,
                    ?10, ?11
                )
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.name_snapshot)
            .bind(&item.sku_snapshot)
            .bind(&item.image_snapshot)
            .bind(item.quantity)
            .bind(item.moq)
            .bind(item.unit_price_minor_units)
            .bind(item.subtotal_minor_units)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO wholesale_order_events (
                id, order_id, event_type, description, performed_by, occurred_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&event.id)
        .bind(&event.order_id)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(&event.performed_by)
        .bind(event.occurred_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order header by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<WholesaleOrder>> {
        let order = sqlx::query_as::<_, WholesaleOrder>(
            r#"
            SELECT
                id, order_number, seller_id, buyer_id, status,
                subtotal_minor_units, deposit_amount_minor_units,
                balance_amount_minor_units, deposit_percentage,
                payment_terms, po_number, currency,
                buyer_email, buyer_name,
                shipping_address, billing_address, created_at
            FROM wholesale_orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets an order header by its human-readable order number.
    pub async fn get_by_number(&self, order_number: &str) -> DbResult<Option<WholesaleOrder>> {
        let order = sqlx::query_as::<_, WholesaleOrder>(
            r#"
            SELECT
                id, order_number, seller_id, buyer_id, status,
                subtotal_minor_units, deposit_amount_minor_units,
                balance_amount_minor_units, deposit_percentage,
                payment_terms, po_number, currency,
                buyer_email, buyer_name,
                shipping_address, billing_address, created_at
            FROM wholesale_orders
            WHERE order_number = ?1
            "#,
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<WholesaleOrderItem>> {
        let items = sqlx::query_as::<_, WholesaleOrderItem>(
            r#"
            SELECT
                id, order_id, product_id,
                name_snapshot, sku_snapshot, image_snapshot,
                quantity, moq, unit_price_minor_units,
                subtotal_minor_units, created_at
            FROM wholesale_order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets the audit trail for an order, oldest first.
    pub async fn get_events(&self, order_id: &str) -> DbResult<Vec<WholesaleOrderEvent>> {
        let events = sqlx::query_as::<_, WholesaleOrderEvent>(
            r#"
            SELECT id, order_id, event_type, description, performed_by, occurred_at
            FROM wholesale_order_events
            WHERE order_id = ?1
            ORDER BY occurred_at, rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Lists a buyer's orders, newest first.
    pub async fn list_for_buyer(&self, buyer_id: &str, limit: u32) -> DbResult<Vec<WholesaleOrder>> {
        let orders = sqlx::query_as::<_, WholesaleOrder>(
            r#"
            SELECT
                id, order_number, seller_id, buyer_id, status,
                subtotal_minor_units, deposit_amount_minor_units,
                balance_amount_minor_units, deposit_percentage,
                payment_terms, po_number, currency,
                buyer_email, buyer_name,
                shipping_address, billing_address, created_at
            FROM wholesale_orders
            WHERE buyer_id = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(buyer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Lists a seller's incoming orders, newest first.
    pub async fn list_for_seller(&self, seller_id: &str, limit: u32) -> DbResult<Vec<WholesaleOrder>> {
        let orders = sqlx::query_as::<_, WholesaleOrder>(
            r#"
            SELECT
                id, order_number, seller_id, buyer_id, status,
                subtotal_minor_units, deposit_amount_minor_units,
                balance_amount_minor_units, deposit_percentage,
                payment_terms, po_number, currency,
                buyer_email, buyer_name,
                shipping_address, billing_address, created_at
            FROM wholesale_orders
            WHERE seller_id = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(seller_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use chrono::Utc;
    use vesta_core::{Address, Buyer, OrderStatus, Product, ORDER_CREATED};

    async fn table_counts(db: &Database) -> (i64, i64, i64) {
        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wholesale_orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wholesale_order_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wholesale_order_events")
            .fetch_one(db.pool())
            .await
            .unwrap();
        (orders, items, events)
    }

    async fn seed_references(db: &Database) {
        let now = Utc::now();
        db.buyers()
            .insert(&Buyer {
                id: "b-1".to_string(),
                email: "buyer@example.com".to_string(),
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                created_at: now,
            })
            .await
            .unwrap();

        for (id, price) in [("p-1", 1250i64), ("p-2", 2000i64)] {
            db.products()
                .insert(&Product {
                    id: id.to_string(),
                    seller_id: "s-1".to_string(),
                    name: format!("Product {id}"),
                    sku: None,
                    image_url: None,
                    price_minor_units: price,
                    moq: None,
                    currency: "USD".to_string(),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }
    }

    fn address() -> Address {
        Address {
            line1: "1 Warehouse Way".to_string(),
            line2: None,
            city: "Portland".to_string(),
            region: Some("OR".to_string()),
            postal_code: Some("97201".to_string()),
            country: "US".to_string(),
        }
    }

    fn sample_graph(
        order_id: &str,
        order_number: &str,
    ) -> (WholesaleOrder, Vec<WholesaleOrderItem>, WholesaleOrderEvent) {
        let now = Utc::now();

        let items = vec![
            WholesaleOrderItem {
                id: format!("{order_id}-i1"),
                order_id: order_id.to_string(),
                product_id: "p-1".to_string(),
                name_snapshot: "Product p-1".to_string(),
                sku_snapshot: None,
                image_snapshot: None,
                quantity: 10,
                moq: 1,
                unit_price_minor_units: 1250,
                subtotal_minor_units: 12_500,
                created_at: now,
            },
            WholesaleOrderItem {
                id: format!("{order_id}-i2"),
                order_id: order_id.to_string(),
                product_id: "p-2".to_string(),
                name_snapshot: "Product p-2".to_string(),
                sku_snapshot: None,
                image_snapshot: None,
                quantity: 5,
                moq: 1,
                unit_price_minor_units: 2000,
                subtotal_minor_units: 10_000,
                created_at: now,
            },
        ];

        let subtotal = 22_500;
        let deposit = 6_750; // 30%
        let order = WholesaleOrder {
            id: order_id.to_string(),
            order_number: order_number.to_string(),
            seller_id: "s-1".to_string(),
            buyer_id: "b-1".to_string(),
            status: OrderStatus::Pending,
            subtotal_minor_units: subtotal,
            deposit_amount_minor_units: deposit,
            balance_amount_minor_units: subtotal - deposit,
            deposit_percentage: 30,
            payment_terms: "Net 30".to_string(),
            po_number: Some("PO-778".to_string()),
            currency: "USD".to_string(),
            buyer_email: "buyer@example.com".to_string(),
            buyer_name: "Ada Lovelace".to_string(),
            shipping_address: address(),
            billing_address: None,
            created_at: now,
        };

        let event = WholesaleOrderEvent {
            id: format!("{order_id}-e1"),
            order_id: order_id.to_string(),
            event_type: ORDER_CREATED.to_string(),
            description: "Wholesale order placed".to_string(),
            performed_by: "b-1".to_string(),
            occurred_at: now,
        };

        (order, items, event)
    }

    #[tokio::test]
    async fn test_order_graph_round_trip() {
        let db = Database::in_memory().await.unwrap();
        seed_references(&db).await;
        let repo = db.orders();

        let (order, items, event) = sample_graph("o-1", "WHS-1700000000000-ABC1234");
        repo.insert_order_graph(&order, &items, &event).await.unwrap();

        assert_eq!(table_counts(&db).await, (1, 2, 1));

        let found = repo.get_by_id("o-1").await.unwrap().unwrap();
        assert_eq!(found.order_number, "WHS-1700000000000-ABC1234");
        assert_eq!(found.status, OrderStatus::Pending);
        assert_eq!(found.subtotal_minor_units, 22_500);
        assert_eq!(found.shipping_address, address());
        assert_eq!(found.billing_address, None);

        let found_items = repo.get_items("o-1").await.unwrap();
        assert_eq!(found_items.len(), 2);
        let item_sum: i64 = found_items.iter().map(|i| i.subtotal_minor_units).sum();
        assert_eq!(item_sum, found.subtotal_minor_units);

        let events = repo.get_events("o-1").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, ORDER_CREATED);

        let by_number = repo
            .get_by_number("WHS-1700000000000-ABC1234")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_number.id, "o-1");
    }

    #[tokio::test]
    async fn test_failed_item_insert_rolls_back_everything() {
        let db = Database::in_memory().await.unwrap();
        seed_references(&db).await;
        let repo = db.orders();

        let (order, mut items, event) = sample_graph("o-1", "WHS-1700000000000-ABC1234");
        // Duplicate item primary key: the second item insert fails after the
        // header and first item already went in.
        items[1].id = items[0].id.clone();

        let err = repo.insert_order_graph(&order, &items, &event).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // No header, no items, no event: the whole graph rolled back.
        assert_eq!(table_counts(&db).await, (0, 0, 0));
        assert!(repo.get_by_id("o-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_order_number_is_unique_violation() {
        let db = Database::in_memory().await.unwrap();
        seed_references(&db).await;
        let repo = db.orders();

        let (order, items, event) = sample_graph("o-1", "WHS-1700000000000-ABC1234");
        repo.insert_order_graph(&order, &items, &event).await.unwrap();

        let (order2, items2, event2) = sample_graph("o-2", "WHS-1700000000000-ABC1234");
        let err = repo
            .insert_order_graph(&order2, &items2, &event2)
            .await
            .unwrap_err();

        assert!(err.is_unique_violation_on("order_number"));
        // The duplicate attempt left nothing behind.
        assert_eq!(table_counts(&db).await, (1, 2, 1));
    }

    #[tokio::test]
    async fn test_item_for_unknown_product_rejected() {
        let db = Database::in_memory().await.unwrap();
        seed_references(&db).await;
        let repo = db.orders();

        let (order, mut items, event) = sample_graph("o-1", "WHS-1700000000000-ABC1234");
        items[0].product_id = "ghost".to_string();

        let err = repo.insert_order_graph(&order, &items, &event).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(table_counts(&db).await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_listings_scope_by_party() {
        let db = Database::in_memory().await.unwrap();
        seed_references(&db).await;
        let repo = db.orders();

        let (order, items, event) = sample_graph("o-1", "WHS-1-AAAAAAA");
        repo.insert_order_graph(&order, &items, &event).await.unwrap();
        let (order, items, event) = sample_graph("o-2", "WHS-2-BBBBBBB");
        repo.insert_order_graph(&order, &items, &event).await.unwrap();

        assert_eq!(repo.list_for_buyer("b-1", 10).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_seller("s-1", 10).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_buyer("b-2", 10).await.unwrap().len(), 0);
        assert_eq!(repo.list_for_seller("s-2", 10).await.unwrap().len(), 0);
        assert_eq!(repo.list_for_buyer("b-1", 1).await.unwrap().len(), 1);
    }
}
