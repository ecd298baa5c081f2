//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::checkout::PricedCart;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{
    Order, OrderSummary, PaymentResult, PlaceOrderRequest, QuoteRequest, UpdateStatusRequest,
};

/// Place an order
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.checkout.place_order(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Price a cart without reserving or persisting anything
pub async fn quote(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<PricedCart>> {
    let priced = state.checkout.quote(&payload.items).await?;
    Ok(Json(priced))
}

/// The calling user's orders, newest first
pub async fn mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.my_orders(&user).await?;
    Ok(Json(orders))
}

/// Summary listing of all orders (admin)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let summaries = state.orders.list_all(&user).await?;
    Ok(Json(summaries))
}

/// Get order by id (owner or admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_order(&user, &id).await?;
    Ok(Json(order))
}

/// Transition order status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_status(&user, &id, payload.status).await?;
    Ok(Json(order))
}

/// Attach a payment result (owner or admin)
pub async fn pay(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PaymentResult>,
) -> AppResult<Json<Order>> {
    let order = state.orders.pay_order(&user, &id, payload).await?;
    Ok(Json(order))
}
