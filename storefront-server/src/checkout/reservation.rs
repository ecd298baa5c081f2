//! Inventory Reservation Manager
//!
//! Atomically validates and decrements stock for every line of an order.
//! Each per-product check-and-decrement is a single guarded statement; the
//! multi-line whole is a saga with a fixed compensating action (re-increment)
//! applied to already-taken lines when a later line fails.

use shared::{AppError, AppResult};
use uuid::Uuid;

use crate::db::repository::{DecrementOutcome, ProductRepository};

/// How many times a single compensating increment is retried before the
/// failure is escalated for operator remediation
const COMPENSATION_RETRIES: usize = 3;

/// One reserved line, kept for compensation and traceability
#[derive(Debug, Clone)]
pub struct ReservedLine {
    pub product: String,
    pub quantity: i64,
}

/// Opaque reservation receipt
///
/// Not redeemable; the only way back is the compensation path.
#[derive(Debug, Clone)]
pub struct ReservationToken {
    pub id: String,
    pub lines: Vec<ReservedLine>,
}

#[derive(Clone)]
pub struct InventoryReservation {
    products: ProductRepository,
}

impl InventoryReservation {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Reserve stock for every line, all-or-nothing
    ///
    /// On the first failing line, every line already decremented for this
    /// attempt is restored before the error is reported. Reservations for
    /// different products do not block each other; same-product races
    /// serialize inside the conditional decrement.
    pub async fn reserve(&self, lines: &[(String, i64)]) -> AppResult<ReservationToken> {
        let mut taken: Vec<ReservedLine> = Vec::with_capacity(lines.len());

        for (product_id, quantity) in lines {
            let outcome = match self
                .products
                .conditional_decrement(product_id, *quantity)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    let failure = AppError::database(e.to_string());
                    return Err(self.roll_back(taken, failure).await);
                }
            };

            match outcome {
                DecrementOutcome::Applied { .. } => taken.push(ReservedLine {
                    product: product_id.clone(),
                    quantity: *quantity,
                }),
                DecrementOutcome::NotEnoughStock => {
                    let failure = self.shortfall_error(product_id, *quantity).await;
                    return Err(self.roll_back(taken, failure).await);
                }
            }
        }

        let token = ReservationToken {
            id: Uuid::new_v4().to_string(),
            lines: taken,
        };
        tracing::debug!(reservation = %token.id, lines = token.lines.len(), "Inventory reserved");
        Ok(token)
    }

    /// Restore previously reserved stock (compensation)
    ///
    /// Each line is retried a fixed number of times; a line that still cannot
    /// be restored escalates as a compensation failure instead of being
    /// silently dropped.
    pub async fn release(&self, lines: &[ReservedLine]) -> AppResult<()> {
        for line in lines {
            let mut restored = false;
            for attempt in 1..=COMPENSATION_RETRIES {
                match self.products.increment(&line.product, line.quantity).await {
                    Ok(true) => {
                        restored = true;
                        break;
                    }
                    // The row vanished; there is no stock record left to
                    // restore, but an operator should see that
                    Ok(false) => {
                        tracing::warn!(
                            product = %line.product,
                            quantity = line.quantity,
                            "Inventory restore skipped, product no longer exists"
                        );
                        restored = true;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(
                            product = %line.product,
                            quantity = line.quantity,
                            attempt,
                            error = %e,
                            "Inventory restore attempt failed"
                        );
                    }
                }
            }
            if !restored {
                tracing::error!(
                    product = %line.product,
                    quantity = line.quantity,
                    "Inventory compensation exhausted retries; stock leaked"
                );
                return Err(AppError::compensation_failed(
                    line.product.clone(),
                    line.quantity,
                ));
            }
        }
        Ok(())
    }

    /// Build the failure for a line whose guard did not pass
    async fn shortfall_error(&self, product_id: &str, requested: i64) -> AppError {
        match self.products.find_by_id(product_id).await {
            Ok(Some(product)) => {
                AppError::insufficient_stock(product_id, requested, product.inventory)
            }
            Ok(None) => AppError::product_unavailable(product_id),
            Err(e) => AppError::database(e.to_string()),
        }
    }

    /// Undo partial work, escalating if the compensation itself fails
    async fn roll_back(&self, taken: Vec<ReservedLine>, failure: AppError) -> AppError {
        match self.release(&taken).await {
            Ok(()) => failure,
            // A leak outranks the original failure
            Err(compensation) => compensation,
        }
    }
}
