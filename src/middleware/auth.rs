use axum::{extract::FromRequestParts, http::header};

use crate::{error::AppError, services::auth_service::verify_token, state::AppState};

/// Operator authenticated by a bearer token issued at login.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        let username = verify_token(&state.jwt_secret, token)?;
        Ok(AuthUser { username })
    }
}
