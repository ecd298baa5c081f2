//! API route modules
//!
//! - [`health`] — liveness check
//! - [`products`] — public catalog reads
//! - [`orders`] — quote, placement, and order lifecycle

pub mod health;
pub mod orders;
pub mod products;

pub use crate::utils::AppResult;
