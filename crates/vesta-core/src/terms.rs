//! # Payment Terms
//!
//! Parsing and due-date arithmetic for wholesale payment terms.
//!
//! A term is the agreed invoice-due policy for the balance of an order:
//! `"Immediate"` (balance due at order date) or `"Net N"` (due N days after
//! the order date). Sellers configure which terms they offer; the validator
//! compares the requested string against that list, and the calculator here
//! turns an accepted term into a concrete due date.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::UnknownTermsError;

/// The payment terms a seller is assumed to offer when nothing is configured.
pub const DEFAULT_PAYMENT_TERMS: &str = "Net 30";

// =============================================================================
// PaymentTerms
// =============================================================================

/// A parsed payment term.
///
/// `Display` and `FromStr` round-trip, so the canonical wire form
/// (`"Immediate"`, `"Net 30"`) is also the storage form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentTerms {
    /// Balance due on the order date.
    Immediate,
    /// Balance due N days after the order date.
    Net(u32),
}

impl PaymentTerms {
    /// The date the balance falls due, given the order date.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use vesta_core::terms::PaymentTerms;
    ///
    /// let ordered = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// assert_eq!(
    ///     PaymentTerms::Net(30).due_date(ordered),
    ///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    /// );
    /// assert_eq!(PaymentTerms::Immediate.due_date(ordered), ordered);
    /// ```
    pub fn due_date(&self, order_date: NaiveDate) -> NaiveDate {
        match self {
            PaymentTerms::Immediate => order_date,
            // chrono only fails on dates beyond year ~262_000; unreachable
            // for any representable order date plus a u32 day count that
            // still fits, so saturate instead of propagating.
            PaymentTerms::Net(days) => order_date
                .checked_add_days(Days::new(*days as u64))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}

impl FromStr for PaymentTerms {
    type Err = UnknownTermsError;

    /// Strict parse: exactly `"Immediate"` or `"Net N"` with a single space
    /// and a bare non-negative integer. Anything else is unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Immediate" {
            return Ok(PaymentTerms::Immediate);
        }

        if let Some(days) = s.strip_prefix("Net ") {
            if !days.is_empty() && days.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(n) = days.parse::<u32>() {
                    return Ok(PaymentTerms::Net(n));
                }
            }
        }

        Err(UnknownTermsError::new(s))
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentTerms::Immediate => write!(f, "Immediate"),
            PaymentTerms::Net(days) => write!(f, "Net {}", days),
        }
    }
}

impl TryFrom<String> for PaymentTerms {
    type Error = UnknownTermsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentTerms> for String {
    fn from(terms: PaymentTerms) -> Self {
        terms.to_string()
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Computes the balance due date for a raw terms string.
///
/// `"Immediate"` returns the order date unchanged; `"Net N"` adds N days;
/// any other string fails with [`UnknownTermsError`].
pub fn payment_due_date(order_date: NaiveDate, terms: &str) -> Result<NaiveDate, UnknownTermsError> {
    let parsed: PaymentTerms = terms.parse()?;
    Ok(parsed.due_date(order_date))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_immediate() {
        assert_eq!("Immediate".parse::<PaymentTerms>().unwrap(), PaymentTerms::Immediate);
    }

    #[test]
    fn test_parse_net() {
        assert_eq!("Net 30".parse::<PaymentTerms>().unwrap(), PaymentTerms::Net(30));
        assert_eq!("Net 0".parse::<PaymentTerms>().unwrap(), PaymentTerms::Net(0));
        assert_eq!("Net 365".parse::<PaymentTerms>().unwrap(), PaymentTerms::Net(365));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["net 30", "Net30", "Net -5", "Net 30 days", "NET 30", "Net ", "Due on receipt", ""] {
            let err = bad.parse::<PaymentTerms>().unwrap_err();
            assert_eq!(err.terms, bad);
        }
    }

    #[test]
    fn test_display_round_trips() {
        for terms in [PaymentTerms::Immediate, PaymentTerms::Net(30), PaymentTerms::Net(7)] {
            let rendered = terms.to_string();
            assert_eq!(rendered.parse::<PaymentTerms>().unwrap(), terms);
        }
    }

    #[test]
    fn test_due_date_net_30() {
        assert_eq!(
            payment_due_date(date(2024, 1, 1), "Net 30").unwrap(),
            date(2024, 1, 31)
        );
    }

    #[test]
    fn test_due_date_immediate() {
        assert_eq!(
            payment_due_date(date(2024, 1, 1), "Immediate").unwrap(),
            date(2024, 1, 1)
        );
    }

    #[test]
    fn test_due_date_crosses_month_and_year() {
        assert_eq!(
            payment_due_date(date(2024, 12, 15), "Net 30").unwrap(),
            date(2025, 1, 14)
        );
        // 2024 is a leap year
        assert_eq!(
            payment_due_date(date(2024, 2, 1), "Net 30").unwrap(),
            date(2024, 3, 2)
        );
    }

    #[test]
    fn test_due_date_unknown_terms() {
        let err = payment_due_date(date(2024, 1, 1), "Unknown").unwrap_err();
        assert_eq!(err.terms, "Unknown");
    }
}
