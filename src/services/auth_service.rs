use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect};

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse},
    entity::users::{Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const TOKEN_TTL_HOURS: i64 = 24;

/// Stored password hash for `username`, or `None` when no such user exists.
pub async fn check_user_credentials<C>(db: &C, username: &str) -> AppResult<Option<String>>
where
    C: ConnectionTrait,
{
    let stored: Option<String> = Users::find_by_id(username.to_owned())
        .select_only()
        .column(UserCol::Password)
        .into_tuple()
        .one(db)
        .await?;
    Ok(stored)
}

/// Argon2 PHC string with a fresh per-user salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(secret: &str, username: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: username.to_owned(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Username carried by a valid, unexpired token.
pub fn verify_token(secret: &str, token: &str) -> AppResult<String> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;
    Ok(decoded.claims.sub)
}

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;

    let stored_hash = match check_user_credentials(&state.orm, &username).await? {
        Some(hash) => hash,
        None => {
            tracing::info!(username = %username, "login rejected: unknown user");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
    };

    if !verify_password(&password, &stored_hash)? {
        tracing::info!(username = %username, "login rejected: wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let token = issue_token(&state.jwt_secret, &username)?;
    tracing::info!(username = %username, "user logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_only_the_original_password() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("s3cret").unwrap();
        let b = hash_password("s3cret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_round_trips_username() {
        let token = issue_token("test-secret", "cashier").unwrap();
        assert_eq!(verify_token("test-secret", &token).unwrap(), "cashier");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token("test-secret", "cashier").unwrap();
        let err = verify_token("another-secret", &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
