//! Repository Module
//!
//! CRUD and conditional-update operations on SurrealDB tables.
//!
//! ID convention: the full "table:key" string is the public ID everywhere;
//! repositories accept either the full form or the bare key.

pub mod order;
pub mod product;

pub use order::OrderRepository;
pub use product::{DecrementOutcome, ProductRepository};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a leading "table:" prefix so callers may pass either form
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// How many times a statement is retried when the storage engine reports an
/// optimistic-transaction conflict
pub(crate) const CONFLICT_RETRIES: usize = 5;

pub(crate) fn is_conflict(err: &surrealdb::Error) -> bool {
    err.to_string().to_lowercase().contains("conflict")
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
