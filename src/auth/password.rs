// Password hashing utilities
// Account passwords are only ever held as bcrypt hashes

use bcrypt::{hash, verify};

use super::errors::{AuthError, AuthResult};

/// Hashes a password with the given bcrypt cost
///
/// # Example
/// ```
/// use storefront_dashboard::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_password", 4).expect("valid hash");
/// assert!(verify_password("my_password", &hash).unwrap());
/// ```
pub fn hash_password(password: &str, cost: u32) -> AuthResult<String> {
    hash(password, cost).map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(true)` / `Ok(false)` - Whether the password matches
/// * `Err(AuthError::Internal)` - If the stored hash is unreadable
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    verify(password, hash)
        .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))
}
