// Bearer token signing and verification
// HS256 JWTs carrying the user id, 8-hour expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};

/// Lifetime of an issued token
pub const TOKEN_TTL_HOURS: i64 = 8;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user id)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Issues and checks bearer tokens with a shared secret
///
/// # Example
/// ```
/// use storefront_dashboard::auth::jwt::TokenSigner;
///
/// let signer = TokenSigner::new("your-secret-key");
/// let token = signer.issue("42").expect("valid token");
///
/// let claims = signer.verify(&token).expect("valid token");
/// assert_eq!(claims.sub, "42");
/// ```
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Creates a token whose subject is `user_id`
    pub fn issue(&self, user_id: &str) -> AuthResult<String> {
        let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiry.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Decodes `token`, rejecting bad signatures and expired tokens
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::unauthorized(format!("Invalid token: {}", e)))
    }
}
