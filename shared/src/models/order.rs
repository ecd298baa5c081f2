//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// `delivered` and `cancelled` are terminal. Transitions are validated by
/// [`OrderStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Processing,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Wire representation, also used as the stored value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are allowed from this status
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Allowed transitions:
    /// processing -> preparing -> out-for-delivery -> delivered,
    /// and any non-terminal status -> cancelled.
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (*self, next) {
            (Self::Processing, Self::Preparing)
            | (Self::Preparing, Self::OutForDelivery)
            | (Self::OutForDelivery, Self::Delivered) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping address; every field is required, no partial address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingAddress {
    /// All four fields must be non-blank
    pub fn is_complete(&self) -> bool {
        ![&self.street, &self.city, &self.state, &self.zip_code]
            .iter()
            .any(|f| f.trim().is_empty())
    }
}

/// Order line item with name/price/image snapshotted at placement time
///
/// Deliberately decoupled from the live product so historical orders stay
/// immutable when the catalog is repriced or a product is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Product reference (String ID)
    pub product: String,
    pub name: String,
    /// Unit price snapshot in currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
    pub image: Option<String>,
}

/// Payment confirmation supplied by the external payment collaborator
///
/// Written once, by a distinct operation from placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
    pub update_time: String,
    pub email: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user reference (String ID)
    pub user: String,
    pub items: Vec<OrderLineItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub payment_result: Option<PaymentResult>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub delivery_instructions: Option<String>,
    pub estimated_delivery: DateTime<Utc>,
    /// Set only on the transition into `delivered`
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Summary projection for the admin order list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub user: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Place order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<super::product::CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub delivery_instructions: Option<String>,
}

/// Quote payload: priced but never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub items: Vec<super::product::CartLine>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Processing,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn test_forward_chain_allowed() {
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_cancel_from_any_non_terminal() {
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_frozen() {
        for next in ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_skipping_or_reversing() {
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::OutForDelivery));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Processing));
        assert!(!OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Preparing));
        for status in ALL {
            // Self-transitions are never allowed
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_status_serde_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_address_completeness() {
        let addr = ShippingAddress {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62704".into(),
        };
        assert!(addr.is_complete());

        let partial = ShippingAddress {
            city: " ".into(),
            ..addr
        };
        assert!(!partial.is_complete());
    }
}
