//! Utility module
//!
//! - Logging setup ([`logger`])
//! - Re-exports of the unified error types from `shared`

pub mod logger;

pub use logger::init_logger_with_file;
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
