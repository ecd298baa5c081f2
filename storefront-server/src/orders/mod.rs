//! Order Lifecycle
//!
//! Reads and transitions over persisted orders: ownership-scoped access,
//! the admin status state machine, payment attachment, and the restock
//! side effect of cancellation.

use chrono::Utc;
use shared::models::{Order, OrderStatus, OrderSummary, PaymentResult};
use shared::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::checkout::{InventoryReservation, ReservedLine};
use crate::db::repository::{OrderRepository, ProductRepository};

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    restock: InventoryReservation,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            restock: InventoryReservation::new(ProductRepository::new(db)),
        }
    }

    /// Fetch one order, visible to its owner and to admins only
    ///
    /// A foreign order is reported as not found, identical to a missing one,
    /// so existence cannot be probed by id.
    pub async fn get_order(&self, user: &CurrentUser, id: &str) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::order_not_found(id))?;

        if order.user != user.id && !user.is_admin() {
            return Err(AppError::order_not_found(id));
        }
        Ok(order)
    }

    /// The calling user's own orders, newest first
    pub async fn my_orders(&self, user: &CurrentUser) -> AppResult<Vec<Order>> {
        self.orders
            .find_by_user(&user.id)
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    /// Summary listing of all orders (admin)
    pub async fn list_all(&self, user: &CurrentUser) -> AppResult<Vec<OrderSummary>> {
        if !user.is_admin() {
            return Err(AppError::admin_required());
        }
        self.orders
            .find_all_summaries()
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    /// Transition an order's status (admin)
    ///
    /// The write is a compare-and-swap against the status this call observed,
    /// so two racing transitions cannot both apply. Entering `delivered`
    /// stamps `delivered_at`; entering `cancelled` restocks every line item.
    pub async fn update_status(
        &self,
        user: &CurrentUser,
        id: &str,
        to: OrderStatus,
    ) -> AppResult<Order> {
        if !user.is_admin() {
            return Err(AppError::admin_required());
        }

        let order = self
            .orders
            .find_by_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::order_not_found(id))?;

        let from = order.status;
        if !from.can_transition_to(to) {
            return Err(AppError::invalid_transition(from.as_str(), to.as_str()));
        }

        let delivered_at = (to == OrderStatus::Delivered).then(Utc::now);
        let updated = self
            .orders
            .update_status_checked(id, from, to, delivered_at)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let updated = match updated {
            Some(updated) => updated,
            // Lost a race: report against whatever the status is now
            None => {
                let current = self
                    .orders
                    .find_by_id(id)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?
                    .ok_or_else(|| AppError::order_not_found(id))?;
                return Err(AppError::invalid_transition(
                    current.status.as_str(),
                    to.as_str(),
                ));
            }
        };

        tracing::info!(
            order = id,
            from = %from,
            to = %to,
            "Order status updated"
        );

        if to == OrderStatus::Cancelled {
            let lines: Vec<ReservedLine> = updated
                .items
                .iter()
                .map(|item| ReservedLine {
                    product: item.product.clone(),
                    quantity: item.quantity,
                })
                .collect();
            // The CAS above means only one transition into cancelled can
            // succeed, so this restock runs at most once per order
            self.restock.release(&lines).await?;
            tracing::info!(order = id, lines = lines.len(), "Cancelled order restocked");
        }

        Ok(updated)
    }

    /// Attach a payment result (owner or admin), only while still processing
    pub async fn pay_order(
        &self,
        user: &CurrentUser,
        id: &str,
        payment: PaymentResult,
    ) -> AppResult<Order> {
        // Reuses the masked read, so paying a foreign order looks like
        // paying a missing one
        let order = self.get_order(user, id).await?;

        if order.status != OrderStatus::Processing {
            return Err(AppError::payment_not_allowed(order.status.as_str()));
        }

        let updated = self
            .orders
            .attach_payment_checked(id, payment)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        match updated {
            Some(updated) => {
                tracing::info!(order = id, "Payment attached");
                Ok(updated)
            }
            // Status moved between the read and the guarded write
            None => {
                let current = self
                    .orders
                    .find_by_id(id)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?
                    .ok_or_else(|| AppError::order_not_found(id))?;
                Err(AppError::payment_not_allowed(current.status.as_str()))
            }
        }
    }
}
