//! Checkout
//!
//! The order-placement core: pricing (pure), inventory reservation
//! (atomic + compensating), and the placement orchestrator that composes
//! them with the order store.

pub mod pricing;
pub mod reservation;

pub use pricing::{PricedCart, PricedLine, price_cart};
pub use reservation::{InventoryReservation, ReservationToken, ReservedLine};

use chrono::{Duration, Utc};
use shared::models::{CartLine, Order, OrderLineItem, PlaceOrderRequest};
use shared::{AppError, AppResult, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::core::CheckoutConfig;
use crate::db::repository::{OrderRepository, ProductRepository};

/// Order Placement Orchestrator
///
/// Every step is a hard gate: any failure aborts the whole placement with
/// nothing persisted and nothing left reserved. Retrying a failed placement
/// is safe (no partial state) but creates a new order, it does not dedupe.
#[derive(Clone)]
pub struct CheckoutService {
    products: ProductRepository,
    orders: OrderRepository,
    reservation: InventoryReservation,
    config: CheckoutConfig,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>, config: CheckoutConfig) -> Self {
        let products = ProductRepository::new(db.clone());
        Self {
            reservation: InventoryReservation::new(products.clone()),
            products,
            orders: OrderRepository::new(db),
            config,
        }
    }

    /// Price a cart without reserving anything
    ///
    /// The returned breakdown is a snapshot; availability is only settled at
    /// reservation time, which fails fast if stock moved underneath.
    pub async fn quote(&self, items: &[CartLine]) -> AppResult<PricedCart> {
        let looked_up = self.look_up(items).await?;
        price_cart(&looked_up, &self.config)
    }

    /// Place an order: price, reserve, persist
    pub async fn place_order(
        &self,
        user: &CurrentUser,
        request: PlaceOrderRequest,
    ) -> AppResult<Order> {
        if request.items.is_empty() {
            return Err(AppError::empty_cart());
        }
        if !request.shipping_address.is_complete() {
            return Err(AppError::new(ErrorCode::AddressIncomplete));
        }
        if request.payment_method.trim().is_empty() {
            return Err(AppError::validation("payment_method is required"));
        }

        // Price against the authoritative catalog; caller-supplied prices
        // never exist in this flow
        let looked_up = self.look_up(&request.items).await?;
        let priced = price_cart(&looked_up, &self.config)?;

        // Reserve all lines as one unit; the manager rolls itself back on
        // partial failure
        let reserve_lines: Vec<(String, i64)> = priced
            .lines
            .iter()
            .map(|line| (line.product.clone(), line.quantity))
            .collect();
        let token = self.reservation.reserve(&reserve_lines).await?;

        let now = Utc::now();
        let order = Order {
            id: None,
            user: user.id.clone(),
            items: priced
                .lines
                .iter()
                .map(|line| OrderLineItem {
                    product: line.product.clone(),
                    name: line.name.clone(),
                    price: line.unit_price,
                    quantity: line.quantity,
                    image: line.image.clone(),
                })
                .collect(),
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            payment_result: None,
            subtotal: priced.subtotal,
            tax: priced.tax,
            delivery_fee: priced.delivery_fee,
            total: priced.total,
            status: Default::default(),
            delivery_instructions: request.delivery_instructions,
            estimated_delivery: now + Duration::hours(self.config.delivery_offset_hours),
            delivered_at: None,
            created_at: now,
        };

        match self.orders.create(order).await {
            Ok(created) => {
                tracing::info!(
                    order = created.id.as_deref().unwrap_or(""),
                    user = %user.id,
                    reservation = %token.id,
                    total = %created.total,
                    "Order placed"
                );
                Ok(created)
            }
            Err(e) => {
                // Stock must never be consumed without a corresponding order
                tracing::warn!(
                    user = %user.id,
                    reservation = %token.id,
                    error = %e,
                    "Order persistence failed, restoring reserved inventory"
                );
                let failure = AppError::database(e.to_string());
                match self.reservation.release(&token.lines).await {
                    Ok(()) => Err(failure),
                    Err(compensation) => Err(compensation),
                }
            }
        }
    }

    /// Resolve every cart line against the catalog, whole-cart or nothing
    async fn look_up(
        &self,
        items: &[CartLine],
    ) -> AppResult<Vec<(shared::models::Product, i64)>> {
        if items.is_empty() {
            return Err(AppError::empty_cart());
        }

        let mut looked_up = Vec::with_capacity(items.len());
        for line in items {
            if line.quantity <= 0 {
                return Err(AppError::invalid_quantity(
                    line.product_id.clone(),
                    line.quantity,
                ));
            }
            let product = self
                .products
                .find_by_id(&line.product_id)
                .await
                .map_err(|e| AppError::database(e.to_string()))?
                .ok_or_else(|| AppError::product_unavailable(&line.product_id))?;
            looked_up.push((product, line.quantity));
        }
        Ok(looked_up)
    }
}
