//! Skiphire
//!
//! Storefront core for skip-hire containers: the product catalog, how it is
//! filtered and sorted, and the in-memory cart a customer fills before checkout.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod observability;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod receipt;
