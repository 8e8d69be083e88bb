use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::auth::jwt::{verify_token, Claims};
use crate::state::AppState;

/// JWT authentication extractor for protected routes
///
/// Usage:
/// ```rust
/// use stamp_api::api::errors::ApiError;
/// use stamp_api::api::middleware::auth::JwtAuth;
///
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", claims.name))
/// }
/// ```
pub struct JwtAuth(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        let state = AppState::from_ref(state);
        let claims = verify_token(token, &state.jwt.secret)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(JwtAuth(claims))
    }
}
