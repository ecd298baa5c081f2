//! Data models
//!
//! Shared between the storefront server and its clients (via API).
//! All money fields are `rust_decimal::Decimal` serialized as floats.

pub mod order;
pub mod product;

// Re-exports
pub use order::*;
pub use product::*;
