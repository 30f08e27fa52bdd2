use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database unavailable: {0}")]
    ConnectionFailure(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ConstraintViolation(String),

    #[error(
        "Insufficient stock for product {product_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: i32,
        available: i32,
        requested: i32,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error")]
    Database(DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConnectionFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if is_connection_error(&err) {
            return AppError::ConnectionFailure(err.to_string());
        }
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => AppError::ConstraintViolation(
                format!("Operation blocked by a referencing record: {detail}"),
            ),
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::ConstraintViolation(format!("Duplicate value: {detail}"))
            }
            _ => AppError::Database(err),
        }
    }
}

fn is_connection_error(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => true,
        DbErr::Exec(RuntimeErr::SqlxError(inner)) | DbErr::Query(RuntimeErr::SqlxError(inner)) => {
            matches!(
                inner,
                sqlx::Error::Io(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            )
        }
        _ => false,
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Database(err) => tracing::error!(error = %err, "database error"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            AppError::ConnectionFailure(detail) => {
                tracing::error!(error = %detail, "database unreachable")
            }
            _ => {}
        }

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_product_and_quantities() {
        let err = AppError::InsufficientStock {
            product_id: 1,
            available: 0,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 0, requested 1"
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn connection_errors_map_to_connection_failure() {
        let err: AppError = DbErr::Conn(RuntimeErr::Internal("refused".into())).into();
        assert!(matches!(err, AppError::ConnectionFailure(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err: AppError = DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::PoolTimedOut)).into();
        assert!(matches!(err, AppError::ConnectionFailure(_)));
    }

    #[test]
    fn other_db_errors_stay_generic() {
        let err: AppError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn every_kind_renders_a_displayable_message() {
        let errors = [
            AppError::NotFound("Order 7 not found".into()),
            AppError::ConstraintViolation("Product 3 is referenced by existing orders".into()),
            AppError::InvalidInput("Invalid payment status 'Shipped'".into()),
            AppError::Unauthorized("Invalid username or password".into()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
