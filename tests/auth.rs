mod common;

use axum::{extract::FromRequestParts, http::Request};
use common::{TEST_SECRET, setup_state};
use inventory_pos_api::{
    dto::auth::LoginRequest,
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    services::auth_service::{self, check_user_credentials, hash_password, issue_token},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};

async fn create_user(state: &AppState, username: &str, password: &str) -> anyhow::Result<()> {
    UserActive {
        username: Set(username.to_owned()),
        password: Set(hash_password(password)?),
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

#[tokio::test]
async fn credential_check_returns_stored_hash_or_nothing() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_user(&state, "cashier", "hunter2").await?;

    let stored = check_user_credentials(&state.orm, "cashier").await?;
    let stored = stored.expect("stored hash");
    assert!(stored.starts_with("$argon2"));
    assert_ne!(stored, "hunter2");

    assert!(check_user_credentials(&state.orm, "nobody").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn login_issues_a_token_for_valid_credentials() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_user(&state, "cashier", "hunter2").await?;

    let resp = auth_service::login(
        &state,
        LoginRequest {
            username: "cashier".into(),
            password: "hunter2".into(),
        },
    )
    .await?;
    let token = resp.data.unwrap().token;
    let raw = token.strip_prefix("Bearer ").expect("bearer prefix");
    assert_eq!(auth_service::verify_token(TEST_SECRET, raw)?, "cashier");

    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user_alike() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_user(&state, "cashier", "hunter2").await?;

    let mut messages = Vec::new();
    for (username, password) in [("cashier", "wrong"), ("ghost", "hunter2")] {
        let err = auth_service::login(
            &state,
            LoginRequest {
                username: username.into(),
                password: password.into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        messages.push(err.to_string());
    }
    assert_eq!(messages[0], messages[1]);

    Ok(())
}

#[tokio::test]
async fn extractor_accepts_bearer_tokens_only() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let token = issue_token(TEST_SECRET, "cashier")?;

    let (mut parts, _) = Request::builder()
        .header("authorization", format!("Bearer {token}"))
        .body(())?
        .into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state).await?;
    assert_eq!(user.username, "cashier");

    for header in [None, Some(format!("Basic {token}")), Some("Bearer garbage".into())] {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let (mut parts, _) = builder.body(())?.into_parts();
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    Ok(())
}
