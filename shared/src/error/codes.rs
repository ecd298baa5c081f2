//! Unified error codes for the storefront order core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1002,
    /// Token is invalid
    TokenInvalid = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart has no items
    EmptyCart = 4002,
    /// Line quantity is zero or negative
    InvalidQuantity = 4003,
    /// Status transition not allowed by the lifecycle state machine
    InvalidTransition = 4004,
    /// Shipping address is missing required fields
    AddressIncomplete = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment result cannot be attached in the order's current status
    PaymentNotAllowed = 5001,

    // ==================== 6xxx: Product / Inventory ====================
    /// Product does not exist in the catalog
    ProductUnavailable = 6001,
    /// Requested quantity exceeds available inventory
    InsufficientStock = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Inventory compensation could not be completed; stock may be leaked
    CompensationFailed = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether this code represents success
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::EmptyCart => "Cart has no items",
            ErrorCode::InvalidQuantity => "Quantity must be a positive integer",
            ErrorCode::InvalidTransition => "Order status transition is not allowed",
            ErrorCode::AddressIncomplete => "Shipping address is incomplete",

            // Payment
            ErrorCode::PaymentNotAllowed => {
                "Payment result can only be attached while the order is processing"
            }

            // Product / Inventory
            ErrorCode::ProductUnavailable => "Product is unavailable",
            ErrorCode::InsufficientStock => "Insufficient inventory for requested quantity",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::CompensationFailed => "Inventory compensation failed",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            5 => ErrorCode::InvalidRequest,
            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::TokenExpired,
            1003 => ErrorCode::TokenInvalid,
            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::AdminRequired,
            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::EmptyCart,
            4003 => ErrorCode::InvalidQuantity,
            4004 => ErrorCode::InvalidTransition,
            4005 => ErrorCode::AddressIncomplete,
            5001 => ErrorCode::PaymentNotAllowed,
            6001 => ErrorCode::ProductUnavailable,
            6002 => ErrorCode::InsufficientStock,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::CompensationFailed,
            9004 => ErrorCode::ConfigError,
            other => return Err(format!("Unknown error code: {}", other)),
        };
        Ok(code)
    }
}
