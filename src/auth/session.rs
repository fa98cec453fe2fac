use std::sync::Arc;

use crate::domain::user::User;
use crate::infrastructure::storage::{KeyValueStore, StorageResult, TOKEN_KEY, USER_KEY};

/// Client-held session: the logged-in user and its bearer token
///
/// Both live in the same store as the collections, under `user` and `token`.
/// Readers never fail: a missing, unreadable or malformed entry reads as
/// "no session".
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The persisted user, if any
    pub fn get_current_user(&self) -> Option<User> {
        let raw = match self.store.read(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed session user");
                None
            }
        }
    }

    /// The persisted bearer token, if any
    pub fn get_token(&self) -> Option<String> {
        match self.store.read(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session token");
                None
            }
        }
    }

    /// True when both a user and a token are present
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some() && self.get_current_user().is_some()
    }

    /// Persists `user` and `token` as the current session
    ///
    /// If the user cannot be written after the token was, the token is
    /// removed again so no half session is left behind.
    pub fn save(&self, user: &User, token: &str) -> StorageResult<()> {
        let raw_user = serde_json::to_string(user)?;
        self.store.write(TOKEN_KEY, token)?;
        if let Err(e) = self.store.write(USER_KEY, &raw_user) {
            if let Err(rollback) = self.store.remove(TOKEN_KEY) {
                tracing::warn!(error = %rollback, "Could not remove token after failed session save");
            }
            return Err(e);
        }
        tracing::info!(user_id = %user.id, "Session started");
        Ok(())
    }

    /// Clears both the user and the token
    pub fn logout(&self) -> StorageResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}
