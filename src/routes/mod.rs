use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod health;
pub mod income;
pub mod orders;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/income", income::router())
}
