use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::{AppError, AppResult};

use crate::auth::JwtService;
use crate::checkout::CheckoutService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;

/// Shared server state
///
/// Holds one handle per service. Clone is shallow (`Arc` / cheap handles),
/// so every request extractor and handler clones freely.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// JWT verification
    pub jwt_service: Arc<JwtService>,
    /// Quote and placement
    pub checkout: CheckoutService,
    /// Order reads and lifecycle transitions
    pub orders: OrderService,
}

impl ServerState {
    fn build(config: Config, db: Surreal<Db>) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::new(config.jwt.clone())),
            checkout: CheckoutService::new(db.clone(), config.checkout.clone()),
            orders: OrderService::new(db.clone()),
            config,
            db,
        }
    }

    /// Initialize state for the server binary
    ///
    /// Ensures the working directory layout exists and opens the
    /// RocksDB-backed database under it.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::internal(format!("Failed to create {}: {e}", db_dir.display())))?;

        let db_path = db_dir.join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        Ok(Self::build(config.clone(), db_service.db))
    }

    /// State over an in-memory database (integration tests)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self::build(config, db_service.db))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
