//! Pricing Engine
//!
//! Pure cart pricing over authoritative catalog products. Caller-supplied
//! prices never enter this computation; the cart only names products and
//! quantities. No mutation happens here, so it is safe to call speculatively
//! for quote/summary display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::models::Product;
use shared::{AppError, AppResult};

use crate::core::CheckoutConfig;

/// Currency precision in decimal places
const CURRENCY_DP: u32 = 2;

/// Round half away from zero at currency precision
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// One priced cart line with the effective unit price snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedLine {
    /// Product reference (String ID)
    pub product: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: i64,
    pub image: Option<String>,
}

/// Fully priced cart: line snapshots plus the total breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Price a cart of (product, quantity) pairs
///
/// The unrounded line totals are summed first and rounded once at the
/// subtotal, so per-line rounding drift cannot accumulate. Tax and the
/// delivery fee derive from the rounded subtotal.
pub fn price_cart(items: &[(Product, i64)], config: &CheckoutConfig) -> AppResult<PricedCart> {
    if items.is_empty() {
        return Err(AppError::empty_cart());
    }

    let mut lines = Vec::with_capacity(items.len());
    let mut raw_subtotal = Decimal::ZERO;

    for (product, quantity) in items {
        let product_id = product.id.clone().unwrap_or_default();
        if *quantity <= 0 {
            return Err(AppError::invalid_quantity(product_id, *quantity));
        }

        let unit_price = product.effective_price();
        raw_subtotal += unit_price * Decimal::from(*quantity);

        lines.push(PricedLine {
            product: product_id,
            name: product.name.clone(),
            unit_price,
            quantity: *quantity,
            image: if product.image.is_empty() {
                None
            } else {
                Some(product.image.clone())
            },
        });
    }

    let subtotal = round_currency(raw_subtotal);
    let tax = round_currency(subtotal * config.tax_rate);
    let delivery_fee = if subtotal >= config.free_delivery_threshold {
        Decimal::ZERO
    } else {
        config.delivery_fee
    };
    let total = subtotal + tax + delivery_fee;

    Ok(PricedCart {
        lines,
        subtotal,
        tax,
        delivery_fee,
        total,
    })
}
