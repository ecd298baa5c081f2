//! Order lifecycle integration tests: transitions, access control, payment
//!
//! Run: cargo test -p storefront-server --test order_lifecycle

use rust_decimal::Decimal;
use shared::models::{CartLine, OrderStatus, PaymentResult, PlaceOrderRequest, ShippingAddress};
use shared::ErrorCode;
use storefront_server::auth::CurrentUser;
use storefront_server::checkout::CheckoutService;
use storefront_server::core::CheckoutConfig;
use storefront_server::db::DbService;
use storefront_server::db::repository::ProductRepository;
use storefront_server::orders::OrderService;

fn customer(id: &str) -> CurrentUser {
    CurrentUser {
        id: format!("user:{id}"),
        role: "customer".into(),
    }
}

fn admin() -> CurrentUser {
    CurrentUser {
        id: "user:root".into(),
        role: "admin".into(),
    }
}

fn payment() -> PaymentResult {
    PaymentResult {
        id: "PAYID-123".into(),
        status: "COMPLETED".into(),
        update_time: "2026-08-28T12:00:00Z".into(),
        email: Some("alice@example.com".into()),
    }
}

struct Harness {
    checkout: CheckoutService,
    orders: OrderService,
    products: ProductRepository,
}

async fn setup() -> Harness {
    let db = DbService::memory().await.unwrap().db;
    Harness {
        checkout: CheckoutService::new(db.clone(), CheckoutConfig::default()),
        orders: OrderService::new(db.clone()),
        products: ProductRepository::new(db),
    }
}

impl Harness {
    async fn seed_product(&self, name: &str, inventory: i64) -> String {
        let product = self
            .products
            .create(shared::models::ProductCreate {
                name: name.into(),
                description: None,
                image: None,
                price: "4.50".parse::<Decimal>().unwrap(),
                sale_price: None,
                unit: "piece".into(),
                inventory,
                featured: None,
            })
            .await
            .unwrap();
        product.id.unwrap()
    }

    async fn place(&self, user: &CurrentUser, product_id: &str, quantity: i64) -> String {
        let order = self
            .checkout
            .place_order(
                user,
                PlaceOrderRequest {
                    items: vec![CartLine {
                        product_id: product_id.into(),
                        quantity,
                    }],
                    shipping_address: ShippingAddress {
                        street: "1 Main St".into(),
                        city: "Springfield".into(),
                        state: "IL".into(),
                        zip_code: "62704".into(),
                    },
                    payment_method: "paypal".into(),
                    delivery_instructions: None,
                },
            )
            .await
            .unwrap();
        order.id.unwrap()
    }
}

#[tokio::test]
async fn admin_advances_through_the_full_chain() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    let id = h.place(&alice, &apple, 1).await;

    let order = h
        .orders
        .update_status(&admin(), &id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);
    assert!(order.delivered_at.is_none());

    h.orders
        .update_status(&admin(), &id, OrderStatus::OutForDelivery)
        .await
        .unwrap();
    let order = h
        .orders
        .update_status(&admin(), &id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
    assert!(order.delivered_at.is_some());
}

#[tokio::test]
async fn skipping_stages_is_rejected() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let id = h.place(&customer("alice"), &apple, 1).await;

    let err = h
        .orders
        .update_status(&admin(), &id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);

    // Status is untouched after the rejection
    let order = h.orders.get_order(&admin(), &id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
}

#[tokio::test]
async fn non_admin_cannot_transition() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    let id = h.place(&alice, &apple, 1).await;

    let err = h
        .orders
        .update_status(&alice, &id, OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);
}

#[tokio::test]
async fn cancellation_restocks_every_line() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let id = h.place(&customer("alice"), &apple, 4).await;

    let after_place = h.products.find_by_id(&apple).await.unwrap().unwrap();
    assert_eq!(after_place.inventory, 6);

    let order = h
        .orders
        .update_status(&admin(), &id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);

    let after_cancel = h.products.find_by_id(&apple).await.unwrap().unwrap();
    assert_eq!(after_cancel.inventory, 10);
}

#[tokio::test]
async fn terminal_orders_are_frozen() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let id = h.place(&customer("alice"), &apple, 1).await;

    h.orders
        .update_status(&admin(), &id, OrderStatus::Cancelled)
        .await
        .unwrap();

    for next in [
        OrderStatus::Preparing,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ] {
        let err = h
            .orders
            .update_status(&admin(), &id, next)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    // The restock ran exactly once
    let after = h.products.find_by_id(&apple).await.unwrap().unwrap();
    assert_eq!(after.inventory, 10);
}

#[tokio::test]
async fn racing_identical_advances_admit_at_most_one() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let id = h.place(&customer("alice"), &apple, 1).await;

    let mut handles = Vec::new();
    for _ in 0..2 {
        let orders = h.orders.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            orders
                .update_status(&admin(), &id, OrderStatus::Preparing)
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(order) => {
                assert_eq!(order.status, OrderStatus::Preparing);
                wins += 1;
            }
            // The loser reports against the status it lost to
            Err(err) => assert_eq!(err.code, ErrorCode::InvalidTransition),
        }
    }
    assert!(wins <= 1);

    let order = h.orders.get_order(&admin(), &id).await.unwrap();
    if wins == 1 {
        assert_eq!(order.status, OrderStatus::Preparing);
    } else {
        assert_eq!(order.status, OrderStatus::Processing);
    }
}

#[tokio::test]
async fn racing_cancel_and_advance_stay_consistent() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let id = h.place(&customer("alice"), &apple, 4).await;

    let cancel = {
        let orders = h.orders.clone();
        let id = id.clone();
        tokio::spawn(async move {
            orders
                .update_status(&admin(), &id, OrderStatus::Cancelled)
                .await
        })
    };
    let advance = {
        let orders = h.orders.clone();
        let id = id.clone();
        tokio::spawn(async move {
            orders
                .update_status(&admin(), &id, OrderStatus::Preparing)
                .await
        })
    };

    let cancel_won = cancel.await.unwrap().is_ok();
    let advance_won = advance.await.unwrap().is_ok();

    let order = h.orders.get_order(&admin(), &id).await.unwrap();
    let inventory = h.products.find_by_id(&apple).await.unwrap().unwrap().inventory;

    if cancel_won {
        // Cancel may land before the advance, or legitimately after it;
        // either way the order ends cancelled and the restock ran exactly
        // once, never twice
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(inventory, 10);
    } else {
        // Cancel lost the swap outright; the advance is the sole winner and
        // no stock came back
        assert!(advance_won);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(inventory, 6);
    }
}

#[tokio::test]
async fn foreign_orders_read_as_missing() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    let id = h.place(&alice, &apple, 1).await;

    // Owner and admin see it
    assert!(h.orders.get_order(&alice, &id).await.is_ok());
    assert!(h.orders.get_order(&admin(), &id).await.is_ok());

    // A stranger gets the same error as for a nonexistent id
    let foreign = h.orders.get_order(&customer("mallory"), &id).await.unwrap_err();
    let missing = h
        .orders
        .get_order(&customer("mallory"), "order:nope")
        .await
        .unwrap_err();
    assert_eq!(foreign.code, ErrorCode::OrderNotFound);
    assert_eq!(foreign.code, missing.code);
}

#[tokio::test]
async fn my_orders_scopes_to_the_caller() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    let bob = customer("bob");
    h.place(&alice, &apple, 1).await;
    h.place(&alice, &apple, 1).await;
    h.place(&bob, &apple, 1).await;

    let mine = h.orders.my_orders(&alice).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.user == alice.id));
}

#[tokio::test]
async fn summary_listing_is_admin_only() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    h.place(&alice, &apple, 2).await;

    let err = h.orders.list_all(&alice).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);

    let summaries = h.orders.list_all(&admin()).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].item_count, 1);
    assert_eq!(summaries[0].status, OrderStatus::Processing);
}

#[tokio::test]
async fn owner_attaches_payment_while_processing() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    let id = h.place(&alice, &apple, 1).await;

    let order = h.orders.pay_order(&alice, &id, payment()).await.unwrap();
    let result = order.payment_result.unwrap();
    assert_eq!(result.id, "PAYID-123");
    assert_eq!(result.status, "COMPLETED");
}

#[tokio::test]
async fn payment_rejected_after_leaving_processing() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let alice = customer("alice");
    let id = h.place(&alice, &apple, 1).await;

    h.orders
        .update_status(&admin(), &id, OrderStatus::Preparing)
        .await
        .unwrap();

    let err = h.orders.pay_order(&alice, &id, payment()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentNotAllowed);
}

#[tokio::test]
async fn stranger_cannot_pay_a_foreign_order() {
    let h = setup().await;
    let apple = h.seed_product("apple", 10).await;
    let id = h.place(&customer("alice"), &apple, 1).await;

    let err = h
        .orders
        .pay_order(&customer("mallory"), &id, payment())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}
