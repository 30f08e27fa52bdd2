use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::products::{ProductList, ProductQuery, UpdateProductRequest, UpsertProductRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(upsert_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = if query.available.unwrap_or(false) {
        product_service::list_available_products(&state).await?
    } else {
        product_service::list_products(&state).await?
    };
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Add a product or restock an existing one", body = ApiResponse<Product>),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn upsert_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<UpsertProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::upsert_by_name(
        &state,
        &payload.name,
        payload.price,
        payload.stock_delta,
    )
    .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Update product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_by_id(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Delete product"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product is referenced by an order"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_by_id(&state, id).await?;
    Ok(Json(resp))
}
