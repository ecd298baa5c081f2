//! Shared types for the storefront order core
//!
//! Domain models and the unified error module used by the server crate and
//! any future clients.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::order::{Order, OrderStatus};
pub use models::product::Product;
