//! Authentication Handlers
//!
//! Registration, login and the current-user profile.

use axum::{extract::State, http::StatusCode, Json};
use spendwise_db::{DbError, DbUser};
use std::sync::Arc;

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RequireAuth, ValidatedJson};
use crate::state::AppState;

fn issue(state: &AppState, user: DbUser) -> ApiResult<AuthResponse> {
    let token = state.auth.jwt.issue_access_token(user.id, &user.email)?;

    Ok(AuthResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        user: UserInfo::from(spendwise_types::User::from(user)),
    })
}

/// User registration
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let email = request.email.trim().to_lowercase();

    let password_hash = state.auth.password.hash_password(&request.password)?;

    let user = state
        .db
        .user_repo()
        .create(&email, &password_hash, request.name.trim())
        .await
        .map_err(|e| match e {
            DbError::Duplicate(_) => ApiError::EmailAlreadyExists,
            other => ApiError::from(other),
        })?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");
    metrics::counter!("spendwise_users_registered_total").increment(1);

    Ok((StatusCode::CREATED, Json(issue(&state, user)?)))
}

/// User login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let email = request.email.trim().to_lowercase();

    let user = state
        .db
        .user_repo()
        .find_by_email(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = state
        .auth
        .password
        .verify_password(&request.password, &user.password_hash)?;

    if !valid {
        tracing::info!(email = %email, "Login rejected");
        metrics::counter!("spendwise_logins_total", "outcome" => "rejected").increment(1);
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!(user_id = user.id, "User logged in");
    metrics::counter!("spendwise_logins_total", "outcome" => "success").increment(1);

    Ok(Json(issue(&state, user)?))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<UserInfo>> {
    let found = state
        .db
        .user_repo()
        .find_by_id(user.user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(UserInfo::from(spendwise_types::User::from(found))))
}
