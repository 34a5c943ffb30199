//! Authentication session: token lifecycle and current user.
//!
//! State machine:
//!
//! ```text
//! Unknown --restore_session--> LoggedIn | LoggedOut   (once, at startup)
//! LoggedOut --login--> LoggedIn --logout | invalidate--> LoggedOut
//! ```
//!
//! The token itself lives in the [`TokenStore`]; this service is its only
//! writer. `user` is present iff a validated token is stored.

use finboard_core::api::FinanceApi;
use finboard_core::auth::{AuthState, Credentials, User};
use finboard_core::storage::TokenStore;
use finboard_core::{FinboardError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct SessionStore {
    api: Arc<dyn FinanceApi>,
    tokens: TokenStore,
    state: RwLock<AuthState>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn FinanceApi>, tokens: TokenStore) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(AuthState::Unknown),
        }
    }

    /// Authenticates against the backend and persists the returned token.
    ///
    /// Bad credentials (400/401/403) surface as [`FinboardError::Auth`] with
    /// the server's message. On any failure the persisted token is untouched.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User> {
        let credentials = Credentials {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.login(&credentials).await {
            Ok(response) => response,
            Err(FinboardError::Api {
                message,
                status_code: 400 | 401 | 403,
                ..
            }) => {
                tracing::info!("[SessionStore] Login rejected for '{}': {}", identifier, message);
                return Err(FinboardError::auth(message));
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Login request failed: {}", e);
                return Err(e);
            }
        };

        let token = response
            .jwt
            .filter(|jwt| !jwt.trim().is_empty())
            .ok_or_else(|| FinboardError::auth("missing token"))?;
        let user = response
            .user
            .ok_or_else(|| FinboardError::auth("missing user in auth response"))?;

        let mut state = self.state.write().await;
        self.tokens.set(&token)?;
        *state = AuthState::LoggedIn(user.clone());

        tracing::info!("[SessionStore] Logged in as '{}'", user.username);
        Ok(user)
    }

    /// Clears the persisted token and the in-memory user. Idempotent.
    ///
    /// The in-memory state is cleared even if removing the token fails; the
    /// storage error is still returned.
    pub async fn logout(&self) -> Result<()> {
        let mut state = self.state.write().await;
        *state = AuthState::LoggedOut;
        self.tokens.clear()?;
        tracing::info!("[SessionStore] Logged out");
        Ok(())
    }

    /// Drops a session the backend no longer accepts.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        *state = AuthState::LoggedOut;
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("[SessionStore] Failed to clear rejected token: {}", e);
        }
        tracing::info!("[SessionStore] Session invalidated by backend");
    }

    /// Rehydrates the session from the persisted token.
    ///
    /// Runs the `Unknown -> LoggedIn | LoggedOut` transition once; later calls
    /// return the current state untouched. Never fails: any validation
    /// problem clears the token and resolves to `LoggedOut`.
    pub async fn restore_session(&self) -> AuthState {
        let mut state = self.state.write().await;
        if *state != AuthState::Unknown {
            return state.clone();
        }

        let token = match self.tokens.get() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("[SessionStore] Could not read persisted token: {}", e);
                None
            }
        };

        let next = match token {
            None => {
                tracing::debug!("[SessionStore] No persisted token");
                AuthState::LoggedOut
            }
            Some(_) => match self.api.current_user().await {
                Ok(user) => {
                    tracing::info!("[SessionStore] Restored session for '{}'", user.username);
                    AuthState::LoggedIn(user)
                }
                Err(e) => {
                    tracing::warn!("[SessionStore] Persisted token rejected: {}", e);
                    if let Err(e) = self.tokens.clear() {
                        tracing::warn!("[SessionStore] Failed to clear persisted token: {}", e);
                    }
                    AuthState::LoggedOut
                }
            },
        };

        *state = next.clone();
        next
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_logged_in()
    }

    /// Auth guard for protected actions.
    pub async fn require_user(&self) -> Result<User> {
        self.current_user()
            .await
            .ok_or_else(|| FinboardError::auth("not logged in"))
    }
}
