use reqwest::{header::AUTHORIZATION, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::session::SessionStore;

/// Error body sent by the REST API
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<BTreeMap<String, String>>,
}

/// JSON client for the REST API
///
/// - Sends `Authorization: Bearer <token>` whenever the session holds a token
/// - Any 401 response clears the session before the error is returned
/// - Non-success statuses are mapped onto [`AuthError`] variants
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:3000/api`)
    pub fn new(base_url: &str, session: SessionStore) -> AuthResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` and decodes a JSON response
    pub async fn get_json<R>(&self, path: &str) -> AuthResult<R>
    where
        R: DeserializeOwned,
    {
        let response = self.request::<()>(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    /// POSTs `body` as JSON and decodes a JSON response
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> AuthResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.request(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// PATCHes `body` as JSON and decodes a JSON response
    pub async fn patch_json<B, R>(&self, path: &str, body: &B) -> AuthResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.request(Method::PATCH, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// DELETEs `path`, ignoring any response body
    pub async fn delete(&self, path: &str) -> AuthResult<()> {
        self.request::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Sends one request with the session's bearer token
    ///
    /// Returns the response only when its status is a success.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AuthResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = self.session.get_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Transport(format!("Request to {} failed: {}", path, e)))?;

        self.check_status(response).await
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> AuthResult<R> {
        response
            .json::<R>()
            .await
            .map_err(|e| AuthError::Transport(format!("Invalid response body: {}", e)))
    }

    async fn check_status(&self, response: Response) -> AuthResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .error
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        match status {
            StatusCode::UNAUTHORIZED => {
                if let Err(e) = self.session.logout() {
                    tracing::warn!(error = %e, "Could not clear session after 401");
                }
                Err(AuthError::Unauthorized { message })
            }
            StatusCode::CONFLICT => Err(AuthError::Conflict { message }),
            StatusCode::NOT_FOUND => Err(AuthError::NotFound { message }),
            StatusCode::BAD_REQUEST => Err(AuthError::Validation {
                message,
                details: body.details.unwrap_or_default(),
            }),
            _ => Err(AuthError::Transport(format!("HTTP {}: {}", status.as_u16(), message))),
        }
    }
}
