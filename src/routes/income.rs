use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::income::{DailyIncomeList, WindowQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{IncomeReport, IncomeSummary},
    response::ApiResponse,
    services::income_service::{self, DEFAULT_BREAKDOWN_WINDOW_DAYS, DEFAULT_SUMMARY_WINDOW_DAYS},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(income_summary))
        .route("/daily", get(daily_income))
        .route("/report", get(income_report))
}

#[utoipa::path(
    get,
    path = "/api/income/summary",
    params(WindowQuery),
    responses(
        (status = 200, description = "Paid totals, all time and trailing window (default 30 days)", body = ApiResponse<IncomeSummary>),
        (status = 400, description = "Invalid window"),
    ),
    security(("bearer_auth" = [])),
    tag = "Income"
)]
pub async fn income_summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<WindowQuery>,
) -> AppResult<Json<ApiResponse<IncomeSummary>>> {
    let window_days = query.window_days.unwrap_or(DEFAULT_SUMMARY_WINDOW_DAYS);
    let resp = income_service::summary(&state, window_days).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/income/daily",
    params(WindowQuery),
    responses(
        (status = 200, description = "Paid income per day (default 60 days), newest first", body = ApiResponse<DailyIncomeList>),
        (status = 400, description = "Invalid window"),
    ),
    security(("bearer_auth" = [])),
    tag = "Income"
)]
pub async fn daily_income(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<WindowQuery>,
) -> AppResult<Json<ApiResponse<DailyIncomeList>>> {
    let window_days = query.window_days.unwrap_or(DEFAULT_BREAKDOWN_WINDOW_DAYS);
    let resp = income_service::daily_breakdown(&state, window_days).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/income/report",
    responses(
        (status = 200, description = "Totals (30-day window) plus daily details (60 days)", body = ApiResponse<IncomeReport>)
    ),
    security(("bearer_auth" = [])),
    tag = "Income"
)]
pub async fn income_report(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<IncomeReport>>> {
    let resp = income_service::report(&state).await?;
    Ok(Json(resp))
}
