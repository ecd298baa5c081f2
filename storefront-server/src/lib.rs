//! Storefront Server — order placement and fulfillment for a retail storefront
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # JWT verification, caller identity
//! ├── checkout/      # Pricing, inventory reservation, placement
//! ├── orders/        # Order lifecycle (reads, transitions, payment)
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # Router assembly and middleware
//! ├── db/            # Embedded SurrealDB and repositories
//! └── utils/         # Logging, shared error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod orders;
pub mod routes;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use checkout::CheckoutService;
pub use core::{CheckoutConfig, Config, Server, ServerState};
pub use orders::OrderService;

// Re-export unified error types from shared
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load environment and initialize logging
///
/// Reads `.env` if present, then sets up the logger with `LOG_LEVEL` and,
/// when `WORK_DIR/logs` exists, daily-rolling file output under it.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("WORK_DIR")
        .map(|dir| format!("{dir}/logs"))
        .ok();

    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
