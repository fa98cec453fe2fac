use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::directory::UserDirectory;
use super::errors::AuthResult;
use super::jwt::TokenSigner;
use super::provider::{AuthProvider, AuthResponse};
use super::session::SessionStore;
use crate::domain::user::{Credentials, Registration, User};

/// Default simulated network latency
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// In-process stand-in for the remote auth API
///
/// Every call waits a fixed delay first (a non-blocking sleep, so other
/// tasks keep running), then answers from the [`UserDirectory`]. There is
/// no cancellation path: a started call always resolves after the delay.
pub struct MockAuthProvider {
    directory: Arc<UserDirectory>,
    session: SessionStore,
    signer: TokenSigner,
    delay: Duration,
}

impl MockAuthProvider {
    pub fn new(
        directory: Arc<UserDirectory>,
        session: SessionStore,
        signer: TokenSigner,
        delay: Duration,
    ) -> Self {
        Self {
            directory,
            session,
            signer,
            delay,
        }
    }

    fn start_session(&self, user: User, message: &str) -> AuthResult<AuthResponse> {
        let token = self.signer.issue(&user.id)?;
        self.session.save(&user, &token)?;
        Ok(AuthResponse {
            message: message.to_string(),
            user,
            token,
        })
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthResponse> {
        tokio::time::sleep(self.delay).await;

        let user = self.directory.authenticate(credentials).await.map_err(|e| {
            tracing::info!(kind = ?e.kind(), "Mock login rejected");
            e
        })?;
        self.start_session(user, "Authenticated")
    }

    async fn register(&self, registration: &Registration) -> AuthResult<AuthResponse> {
        tokio::time::sleep(self.delay).await;

        let user = self.directory.register(registration).await.map_err(|e| {
            tracing::info!(kind = ?e.kind(), "Mock registration rejected");
            e
        })?;
        tracing::info!(user_id = %user.id, "Mock account created");
        self.start_session(user, "User created")
    }

    fn session(&self) -> &SessionStore {
        &self.session
    }
}
