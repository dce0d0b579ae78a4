//! # Post-commit Effects
//!
//! Cache invalidation and order-created notifications, fired after the
//! placement transaction commits.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FIRE AND FORGET                                                        │
//! │                                                                         │
//! │  • Run outside the transaction boundary, on a spawned task              │
//! │  • At-most-once: no delivery guarantee, no retry queue                  │
//! │  • Idempotent: re-invalidating a key or re-publishing an event          │
//! │    is harmless                                                          │
//! │  • Failure is logged at warn and swallowed - the committed order        │
//! │    is never rolled back or failed because a cache was unreachable.      │
//! │    Worst case the order is slow to appear in lists and feeds.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backends are trait objects so the engine runs identically against
//! redis, a test double, or nothing at all.

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::{debug, trace};

// =============================================================================
// Error Types
// =============================================================================

/// Cache backend failure. Logged and swallowed, never surfaced to callers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Notification backend failure. Logged and swallowed, never surfaced.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend error: {0}")]
    Backend(String),
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Order-list cache owned by an external collaborator.
#[async_trait]
pub trait OrderCache: Send + Sync {
    /// Drops a single cache key.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;

    /// Drops every key under a prefix (e.g. a buyer's paginated order
    /// lists).
    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}

/// Real-time notification publisher owned by an external collaborator.
/// At-most-once; no delivery guarantee required.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Publishes an event onto a channel.
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError>;
}

// =============================================================================
// No-op Implementations
// =============================================================================

/// Cache that drops nothing. Used when no redis backend is configured.
#[derive(Debug, Clone, Default)]
pub struct NullCache;

#[async_trait]
impl OrderCache for NullCache {
    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        trace!(key = %key, "NullCache: invalidate ignored");
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        trace!(prefix = %prefix, "NullCache: invalidate_prefix ignored");
        Ok(())
    }
}

/// Notifier that publishes nowhere. Used when no redis backend is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct NullNotifier;

#[async_trait]
impl OrderNotifier for NullNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        _payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        trace!(channel = %channel, event = %event, "NullNotifier: publish ignored");
        Ok(())
    }
}

// =============================================================================
// Redis Implementations
// =============================================================================

/// Redis-backed order-list cache.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to redis and returns a cache handle. The connection manager
    /// reconnects on its own after transient failures.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Backend(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(RedisCache { conn })
    }
}

#[async_trait]
impl OrderCache for RedisCache {
    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        debug!(key = %key, "Cache key invalidated");
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn
            .keys(format!("{prefix}*"))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        if !keys.is_empty() {
            let dropped = keys.len();
            conn.del::<_, ()>(keys)
                .await
                .map_err(|e| CacheError::Backend(e.to_string()))?;
            debug!(prefix = %prefix, dropped, "Cache prefix invalidated");
        }
        Ok(())
    }
}

/// Redis pub/sub notification publisher.
#[derive(Clone)]
pub struct RedisNotifier {
    conn: redis::aio::ConnectionManager,
}

impl RedisNotifier {
    /// Connects to redis and returns a publisher handle.
    pub async fn connect(url: &str) -> Result<Self, NotifyError> {
        let client = redis::Client::open(url).map_err(|e| NotifyError::Backend(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| NotifyError::Backend(e.to_string()))?;
        Ok(RedisNotifier { conn })
    }
}

#[async_trait]
impl OrderNotifier for RedisNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        let envelope = serde_json::json!({
            "event": event,
            "data": payload,
        });

        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(channel, envelope.to_string())
            .await
            .map_err(|e| NotifyError::Backend(e.to_string()))?;

        debug!(channel = %channel, event = %event, "Notification published");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_backends_always_succeed() {
        let cache = NullCache;
        cache.invalidate("wholesale:orders:buyer:b-1:page:1").await.unwrap();
        cache.invalidate_prefix("wholesale:orders:buyer:b-1").await.unwrap();

        let notifier = NullNotifier;
        notifier
            .publish("buyer:b-1", "wholesale_order_created", serde_json::json!({}))
            .await
            .unwrap();
    }
}
