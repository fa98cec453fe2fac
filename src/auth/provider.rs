use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::directory::UserDirectory;
use super::errors::AuthResult;
use super::jwt::TokenSigner;
use super::mock::MockAuthProvider;
use super::remote::HttpAuthProvider;
use super::session::SessionStore;
use crate::config::Settings;
use crate::domain::user::{Credentials, Registration, User};
use crate::infrastructure::storage::KeyValueStore;

/// Payload returned by a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Something that can log users in and register them
///
/// On success an implementation has already persisted the session through
/// its [`SessionStore`]; on failure the stored session is left as it was.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthResponse>;

    async fn register(&self, registration: &Registration) -> AuthResult<AuthResponse>;

    /// Session written by this provider
    fn session(&self) -> &SessionStore;

    fn logout(&self) -> AuthResult<()> {
        self.session().logout()?;
        Ok(())
    }
}

/// Picks the mock provider or the remote one according to `use_mock_api`
pub fn provider_from_settings(
    settings: &Settings,
    store: Arc<dyn KeyValueStore>,
) -> AuthResult<Box<dyn AuthProvider>> {
    let session = SessionStore::new(store);

    if settings.use_mock_api {
        tracing::warn!("Demo mode: accounts live in memory and reset on restart");
        let directory = Arc::new(UserDirectory::with_demo_users(settings.bcrypt_cost)?);
        Ok(Box::new(MockAuthProvider::new(
            directory,
            session,
            TokenSigner::new(&settings.jwt_secret),
            settings.auth_delay,
        )))
    } else {
        tracing::info!(base_url = %settings.api_base_url, "Using remote auth API");
        Ok(Box::new(HttpAuthProvider::new(&settings.api_base_url, session)?))
    }
}
