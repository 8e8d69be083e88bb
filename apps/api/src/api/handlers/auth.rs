use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::AUTHORIZATION,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::extract::AppJson;
use crate::api::middleware::auth::JwtAuth;
use crate::auth::jwt::create_token;
use crate::auth::password::verify_password;
use crate::domain::user::Username;
use crate::state::AppState;
use crate::usecase::user::{
    register_user, RegisterUserError, RegisterUserInput, RegisterUserResult,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// The authenticated user
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
}

/// Body of the registration validation endpoint
#[derive(Debug, Deserialize)]
pub struct ValidateRegistrationRequest {
    pub username: String,
    pub password: String,
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterUserInput>,
) -> Result<Json<RegisterUserResult>, ApiError> {
    let result = register_user(state.users.as_ref(), req)
        .await
        .map_err(|e| match e {
            RegisterUserError::Invalid(message) => ApiError::bad_request(message),
            RegisterUserError::NameTaken => ApiError::conflict("Name already registered"),
            other => {
                tracing::error!("registration failed: {}", other);
                ApiError::internal_server_error("Failed to register user")
            }
        })?;

    tracing::info!(user_id = result.id, "user registered");
    Ok(Json(result))
}

/// Login with name and password
///
/// POST /auth/login
///
/// The token comes back both in the body and as `Authorization: Bearer <token>`.
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name =
        Username::new(&req.name).map_err(|_| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let user = state
        .users
        .find_by_name(&name)
        .await
        .map_err(|e| {
            tracing::error!("login lookup failed: {}", e);
            ApiError::internal_server_error("Database error")
        })?
        .ok_or_else(|| {
            tracing::warn!("login for unknown user");
            ApiError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        tracing::error!(user_id = user.id, "password verification failed: {}", e);
        ApiError::internal_server_error("Password verification failed")
    })?;

    if !valid {
        tracing::warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(
        user.id,
        user.name.as_str(),
        &state.jwt.secret,
        state.jwt.token_ttl,
    )
    .map_err(|e| {
        tracing::error!("failed to sign token: {}", e);
        ApiError::internal_server_error("error signing token")
    })?;

    Ok((
        [(AUTHORIZATION, format!("Bearer {}", token))],
        Json(LoginResponse {
            message: "Login successful!".to_string(),
            token,
        }),
    ))
}

/// The user the bearer token belongs to
///
/// GET /auth/me
pub async fn me(
    JwtAuth(claims): JwtAuth,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("user lookup failed: {}", e);
            ApiError::internal_server_error("Database error")
        })?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

    Ok(Json(MeResponse {
        id: user.id,
        name: user.name.to_string(),
    }))
}

/// Checks a registration form without creating anything
///
/// POST /api/register
pub async fn validate_registration(
    payload: Result<Json<ValidateRegistrationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    if req.username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }
    if req.password.is_empty() {
        return Err(ApiError::bad_request("password is required"));
    }

    Ok(Json(json!({ "data": "validated!" })))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
