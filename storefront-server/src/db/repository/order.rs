//! Order Repository
//!
//! Persistence for orders. Status transitions and payment attachment are
//! compare-and-swap updates conditioned on the expected current status, so a
//! racing cancel and advance can never both apply.

use super::{BaseRepository, CONFLICT_RETRIES, RepoError, RepoResult, is_conflict, record_key};
use chrono::{DateTime, Utc};
use shared::models::{Order, OrderStatus, OrderSummary, PaymentResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order and return it with its assigned id
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let key = Uuid::new_v4().simple().to_string();
        self.base
            .db()
            .query("CREATE type::thing('order', $key) CONTENT $data RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("data", order))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id).to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM type::thing('order', $key)")
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// All orders for one user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT *, <string>id AS id FROM order \
                 WHERE user = $user ORDER BY created_at DESC",
            )
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Summary projection of every order, newest first (admin listing)
    pub async fn find_all_summaries(&self) -> RepoResult<Vec<OrderSummary>> {
        let summaries: Vec<OrderSummary> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS id, user, total, status, \
                 array::len(items) AS item_count, created_at \
                 FROM order ORDER BY created_at DESC",
            )
            .await?
            .take(0)?;
        Ok(summaries)
    }

    /// Compare-and-swap status update
    ///
    /// Applies `to` only while the stored status still equals `from`;
    /// `delivered_at` is stamped in the same statement when entering the
    /// delivered state. Returns the updated order, or None when the
    /// precondition failed (missing order or status changed underneath us).
    pub async fn update_status_checked(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id).to_string();

        let query = if delivered_at.is_some() {
            "UPDATE type::thing('order', $key) \
             SET status = $to, delivered_at = $delivered_at \
             WHERE status = $from \
             RETURN VALUE <string>id"
        } else {
            "UPDATE type::thing('order', $key) \
             SET status = $to \
             WHERE status = $from \
             RETURN VALUE <string>id"
        };

        let mut attempt = 0;
        let updated: Vec<String> = loop {
            let mut request = self
                .base
                .db()
                .query(query)
                .bind(("key", key.clone()))
                .bind(("from", from))
                .bind(("to", to));
            if let Some(stamp) = delivered_at {
                request = request.bind(("delivered_at", stamp));
            }

            match request.await {
                Ok(mut response) => break response.take(0)?,
                // The optimistic storage engine may ask us to retry; the
                // status guard still decides whether the swap applies
                Err(e) if is_conflict(&e) && attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        };

        if updated.is_empty() {
            return Ok(None);
        }
        self.find_by_id(&key).await
    }

    /// Attach a payment result, but only while the order is still processing
    ///
    /// Returns None when the order is missing or no longer processing.
    pub async fn attach_payment_checked(
        &self,
        id: &str,
        payment: PaymentResult,
    ) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id).to_string();

        let mut attempt = 0;
        let updated: Vec<String> = loop {
            let result = self
                .base
                .db()
                .query(
                    "UPDATE type::thing('order', $key) \
                     SET payment_result = $payment \
                     WHERE status = $processing \
                     RETURN VALUE <string>id",
                )
                .bind(("key", key.clone()))
                .bind(("payment", payment.clone()))
                .bind(("processing", OrderStatus::Processing))
                .await;

            match result {
                Ok(mut response) => break response.take(0)?,
                Err(e) if is_conflict(&e) && attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        };

        if updated.is_empty() {
            return Ok(None);
        }
        self.find_by_id(&key).await
    }
}
