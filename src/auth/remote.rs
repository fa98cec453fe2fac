use async_trait::async_trait;

use super::errors::AuthResult;
use super::provider::{AuthProvider, AuthResponse};
use super::session::SessionStore;
use crate::domain::user::{Credentials, Registration};
use crate::infrastructure::http::ApiClient;

/// AuthProvider backed by the REST API
///
/// `POST {base}/auth/login` and `POST {base}/auth/register`; 401, 409 and
/// 400 answers come back as `Unauthorized`, `Conflict` and `Validation`.
pub struct HttpAuthProvider {
    client: ApiClient,
}

impl HttpAuthProvider {
    pub fn new(base_url: &str, session: SessionStore) -> AuthResult<Self> {
        Ok(Self {
            client: ApiClient::new(base_url, session)?,
        })
    }

    /// Client for further authenticated calls with the stored session
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn remember(&self, response: AuthResponse) -> AuthResult<AuthResponse> {
        if !response.token.is_empty() {
            self.client.session().save(&response.user, &response.token)?;
        }
        Ok(response)
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthResponse> {
        let response = self.client.post_json("auth/login", credentials).await?;
        self.remember(response)
    }

    async fn register(&self, registration: &Registration) -> AuthResult<AuthResponse> {
        let response = self.client.post_json("auth/register", registration).await?;
        self.remember(response)
    }

    fn session(&self) -> &SessionStore {
        self.client.session()
    }
}
