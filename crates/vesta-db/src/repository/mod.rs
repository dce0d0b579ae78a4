//! # Repository Implementations
//!
//! One repository per aggregate, each a thin struct over the shared pool:
//!
//! - [`product::ProductRepository`] - catalog reads for item resolution
//! - [`buyer::BuyerRepository`] - buyer contact lookups
//! - [`grant::GrantRepository`] - wholesale access grants
//! - [`program::ProgramRepository`] - per-seller wholesale configuration
//! - [`order::OrderRepository`] - order graph writes and reads

pub mod buyer;
pub mod grant;
pub mod order;
pub mod product;
pub mod program;
