//! Auth-session state for the current console user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Session`] is the single owner of the token and profile. It is handed to
//! the HTTP client and the router at construction, so token rotation and
//! forced logout go through its hooks instead of a global. Durable storage
//! mirrors the token: every in-memory token write is paired with a storage
//! write.
//!
//! CONCURRENCY
//! ===========
//! Concurrent responses may each rotate the token; the last one processed
//! wins. Locks are never held across an await.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::{LoginRequest, UserProfile};
use crate::util::auth::mask_token;
use crate::util::storage::{Storage, TOKEN_KEY};

/// Current token and profile. `token` alone decides "logged in".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
}

struct SessionInner {
    state: RwLock<SessionState>,
    storage: Arc<dyn Storage>,
}

/// Shared handle over the session state and its durable mirror.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("is_login", &self.is_login()).finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session seeded with the token found in `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let token = read_token(storage.as_ref());
        Self { inner: Arc::new(SessionInner { state: RwLock::new(SessionState { token, profile: None }), storage }) }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn is_login(&self) -> bool {
        self.read().token.is_some()
    }

    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.read().profile.clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.read().profile.as_ref().map(|profile| profile.user_id.clone())
    }

    /// Token as currently persisted, read fresh from storage.
    #[must_use]
    pub fn stored_token(&self) -> Option<String> {
        read_token(self.inner.storage.as_ref())
    }

    /// Make `token` current in storage and memory.
    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.inner.storage.set(TOKEN_KEY, token) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
        self.write().token = Some(token.to_owned());
    }

    pub fn set_profile(&self, profile: UserProfile) {
        self.write().profile = Some(profile);
    }

    /// Hook for a token rotated by the backend through a response header.
    pub fn apply_rotated_token(&self, token: &str) {
        let previous = self.stored_token();
        tracing::info!(
            old = %previous.as_deref().map(mask_token).unwrap_or_default(),
            new = %mask_token(token),
            "session token rotated"
        );
        self.set_token(token);
    }

    /// Hook for an authorization failure: the session is no longer valid.
    pub fn expire(&self) {
        tracing::warn!("session expired; clearing token");
        self.clear();
    }

    /// Drop token and profile from memory and the token from storage.
    pub fn clear(&self) {
        {
            let mut state = self.write();
            state.token = None;
            state.profile = None;
        }
        if let Err(e) = self.inner.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "failed to remove persisted session token");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_token(storage: &dyn Storage) -> Option<String> {
    match storage.get(TOKEN_KEY) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted session token");
            None
        }
    }
}

// =============================================================================
// STORE ACTIONS
// =============================================================================

/// Session actions that talk to the backend.
#[derive(Clone)]
pub struct SessionStore {
    http: HttpClient,
}

impl SessionStore {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.http.session()
    }

    #[must_use]
    pub fn is_login(&self) -> bool {
        self.session().is_login()
    }

    /// Log in and make the returned token current.
    ///
    /// Any failure yields `false` and leaves the existing session as it was;
    /// the HTTP client has already notified the user.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let request = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        match api::login(&self.http, &request).await {
            Ok(token) => {
                self.session().set_token(&token);
                tracing::info!(%username, "logged in");
                true
            }
            Err(e) => {
                tracing::info!(%username, code = e.error_code(), "login failed");
                false
            }
        }
    }

    /// Log out remotely, then clear the local session whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the remote failure, after the local session has been cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _clear = ClearOnDrop(self.session());
        let result = api::logout(&self.http).await;
        tracing::info!(remote_ok = result.is_ok(), "logged out");
        result
    }

    pub fn set_profile(&self, profile: UserProfile) {
        self.session().set_profile(profile);
    }

    /// Fetch a user record and make it the session profile.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the profile is left unchanged.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let profile = api::get_user_by_id(&self.http, user_id).await?;
        self.set_profile(profile.clone());
        Ok(profile)
    }
}

/// Clears the session when dropped, including when the owning future is
/// cancelled mid-request.
struct ClearOnDrop<'a>(&'a Session);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}
