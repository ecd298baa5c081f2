//! RocksDB-backed database smoke test
//!
//! The other integration suites run in memory; this one exercises the same
//! repository operations against the on-disk engine the server binary uses.

use rust_decimal::Decimal;
use shared::models::ProductCreate;
use storefront_server::db::DbService;
use storefront_server::db::repository::{DecrementOutcome, ProductRepository};

#[tokio::test]
async fn rocksdb_backend_supports_the_inventory_primitives() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("storefront.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let repo = ProductRepository::new(service.db.clone());

    let product = repo
        .create(ProductCreate {
            name: "apple".into(),
            description: None,
            image: None,
            price: "2.50".parse::<Decimal>().unwrap(),
            sale_price: None,
            unit: "kg".into(),
            inventory: 3,
            featured: None,
        })
        .await
        .unwrap();
    let id = product.id.unwrap();

    let outcome = repo.conditional_decrement(&id, 2).await.unwrap();
    assert_eq!(outcome, DecrementOutcome::Applied { remaining: 1 });

    // Guard holds on the same engine the binary runs on
    let outcome = repo.conditional_decrement(&id, 2).await.unwrap();
    assert_eq!(outcome, DecrementOutcome::NotEnoughStock);

    assert!(repo.increment(&id, 2).await.unwrap());
    let after = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(after.inventory, 3);
}
