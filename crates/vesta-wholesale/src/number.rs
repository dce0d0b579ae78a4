//! # Order Number Generation
//!
//! Human-readable business ids for wholesale orders:
//! `WHS-{epoch millis}-{7 random base36 chars, uppercase}`,
//! e.g. `WHS-1706745600123-K3F9Q2A`.
//!
//! Timestamp plus 36^7 (~78 billion) suffixes makes collisions rare but not
//! impossible under heavy concurrency, so the schema carries a UNIQUE
//! constraint on `order_number` and the placement engine regenerates and
//! retries on conflict rather than trusting entropy alone.

use chrono::Utc;
use rand::Rng;

use vesta_core::ORDER_NUMBER_PREFIX;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 7;

/// Generates a fresh wholesale order number.
pub fn generate_order_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!(
        "{}-{}-{}",
        ORDER_NUMBER_PREFIX,
        Utc::now().timestamp_millis(),
        suffix
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "WHS");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_numbers_differ() {
        let a = generate_order_number();
        let b = generate_order_number();
        // Same millisecond is likely; identical 7-char suffixes are a
        // 1-in-78-billion event.
        assert_ne!(a, b);
    }
}
