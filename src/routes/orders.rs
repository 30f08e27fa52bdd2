use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};

use crate::{
    dto::orders::{
        CreateOrderRequest, OrderItemList, OrderList, OrderWithItems, UpdateOrderStatusRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{CreatedOrder, OrderSummary},
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order).delete(delete_order))
        .route("/{id}/items", get(list_order_items))
        .route("/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Order history, newest first", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Record a sale", body = ApiResponse<CreatedOrder>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Unknown product"),
        (status = 409, description = "Insufficient stock"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<CreatedOrder>>> {
    tracing::debug!(operator = %user.username, lines = payload.items.len(), "recording sale");
    let resp = order_service::create_order(&state, &payload.customer_name, &payload.items).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its line items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/items",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Line items of an order", body = ApiResponse<OrderItemList>),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_order_items(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderItemList>>> {
    let resp = order_service::list_order_items(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Change payment status", body = ApiResponse<OrderSummary>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<OrderSummary>>> {
    let resp = order_service::set_status(&state, id, &payload.status).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Delete order, returning stock when it was paid"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = order_service::delete_order(&state, id).await?;
    Ok(Json(resp))
}
