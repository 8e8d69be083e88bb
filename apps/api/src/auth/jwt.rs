// JWT token creation and verification
// HS256 bearer tokens carrying the user id and name

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID (subject)
    pub sub: i64,
    /// User name at the time the token was issued
    pub name: String,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a signed token for a user
///
/// # Example
/// ```
/// use chrono::Duration;
/// use stamp_api::auth::jwt::{create_token, verify_token};
///
/// let token = create_token(7, "alice", "secret", Duration::minutes(3)).unwrap();
/// let claims = verify_token(&token, "secret").expect("valid token");
/// assert_eq!(claims.sub, 7);
/// assert_eq!(claims.name, "alice");
/// ```
pub fn create_token(
    user_id: i64,
    name: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, String> {
    let expiry = Utc::now() + ttl;
    let claims = Claims {
        sub: user_id,
        name: name.to_string(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a token
///
/// Fails on a bad signature, a malformed token or an expired `exp`.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
