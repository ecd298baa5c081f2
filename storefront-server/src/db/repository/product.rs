//! Product Repository
//!
//! Catalog reads plus the two inventory primitives the reservation manager
//! is built on: a guarded single-statement decrement and a plain increment.

use super::{BaseRepository, CONFLICT_RETRIES, RepoError, RepoResult, is_conflict, record_key};
use shared::models::{Product, ProductCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

const PRODUCT_TABLE: &str = "product";

/// Result of a conditional inventory decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Inventory was taken; `remaining` is the post-decrement count
    Applied { remaining: i64 },
    /// The guard failed: the product is missing or under-stocked
    NotEnoughStock,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, alphabetical
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let key = record_key(PRODUCT_TABLE, id).to_string();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM type::thing('product', $key)")
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product (seeding and tests; catalog CRUD is out of scope)
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.price.is_sign_negative() {
            return Err(RepoError::Validation("price must be non-negative".into()));
        }
        if data.inventory < 0 {
            return Err(RepoError::Validation(
                "inventory must be non-negative".into(),
            ));
        }
        if let Some(sale) = data.sale_price
            && (sale.is_sign_negative() || sale > data.price)
        {
            return Err(RepoError::Validation(
                "sale_price must be between 0 and price".into(),
            ));
        }

        let product = Product {
            id: None,
            name: data.name,
            description: data.description.unwrap_or_default(),
            image: data.image.unwrap_or_default(),
            price: data.price,
            sale_price: data.sale_price,
            unit: data.unit,
            inventory: data.inventory,
            featured: data.featured.unwrap_or(false),
            created_at: chrono::Utc::now(),
        };

        let key = Uuid::new_v4().simple().to_string();
        self.base
            .db()
            .query("CREATE type::thing('product', $key) CONTENT $data RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("data", product))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Atomically decrement inventory if enough stock is available
    ///
    /// The check and the write are one statement; there is no suspension
    /// point between them for a concurrent reservation to interleave.
    pub async fn conditional_decrement(
        &self,
        id: &str,
        quantity: i64,
    ) -> RepoResult<DecrementOutcome> {
        if quantity <= 0 {
            return Err(RepoError::Validation("quantity must be positive".into()));
        }
        let key = record_key(PRODUCT_TABLE, id).to_string();

        let mut attempt = 0;
        loop {
            let result = self
                .base
                .db()
                .query(
                    "UPDATE type::thing('product', $key) \
                     SET inventory -= $qty \
                     WHERE inventory >= $qty \
                     RETURN VALUE inventory",
                )
                .bind(("key", key.clone()))
                .bind(("qty", quantity))
                .await;

            match result {
                Ok(mut response) => {
                    let remaining: Vec<i64> = response.take(0)?;
                    return Ok(match remaining.into_iter().next() {
                        Some(remaining) => DecrementOutcome::Applied { remaining },
                        None => DecrementOutcome::NotEnoughStock,
                    });
                }
                // The optimistic storage engine may ask us to retry
                Err(e) if is_conflict(&e) && attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Increment inventory (compensation and cancellation restock)
    ///
    /// Returns false when the product no longer exists.
    pub async fn increment(&self, id: &str, quantity: i64) -> RepoResult<bool> {
        if quantity <= 0 {
            return Err(RepoError::Validation("quantity must be positive".into()));
        }
        let key = record_key(PRODUCT_TABLE, id).to_string();

        let mut attempt = 0;
        loop {
            let result = self
                .base
                .db()
                .query(
                    "UPDATE type::thing('product', $key) \
                     SET inventory += $qty \
                     RETURN VALUE inventory",
                )
                .bind(("key", key.clone()))
                .bind(("qty", quantity))
                .await;

            match result {
                Ok(mut response) => {
                    let updated: Vec<i64> = response.take(0)?;
                    return Ok(!updated.is_empty());
                }
                Err(e) if is_conflict(&e) && attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
