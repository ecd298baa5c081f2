//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity (catalog snapshot consumed by the order core)
///
/// Inventory is mutated only through the reservation manager's conditional
/// decrement / increment primitives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Base price in currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Sale price; effective only when present and <= base price
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
    /// Unit label (e.g. kg, lb, piece)
    pub unit: String,
    /// Available inventory count (>= 0 invariant)
    pub inventory: i64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Effective unit price: sale price when present and valid, else base price
    pub fn effective_price(&self) -> Decimal {
        match self.sale_price {
            Some(sale) if sale >= Decimal::ZERO && sale <= self.price => sale,
            _ => self.price,
        }
    }
}

/// Create product payload (seeding and tests; catalog CRUD is out of scope)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
    pub unit: String,
    pub inventory: i64,
    pub featured: Option<bool>,
}

/// One cart line as supplied by the caller
///
/// Never carries a price; pricing is always re-derived from the catalog at
/// placement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product reference (String ID)
    pub product_id: String,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(price: &str, sale: Option<&str>) -> Product {
        Product {
            id: None,
            name: "Apples".into(),
            description: String::new(),
            image: String::new(),
            price: price.parse().unwrap(),
            sale_price: sale.map(|s| s.parse().unwrap()),
            unit: "kg".into(),
            inventory: 10,
            featured: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_effective_price_uses_sale() {
        assert_eq!(
            product("10.00", Some("8.00")).effective_price(),
            dec("8.00")
        );
    }

    #[test]
    fn test_effective_price_ignores_invalid_sale() {
        // Sale above base price is not honored
        assert_eq!(
            product("10.00", Some("12.00")).effective_price(),
            dec("10.00")
        );
        assert_eq!(product("10.00", None).effective_price(), dec("10.00"));
    }
}
