//! Session state manager.
//!
//! Holds the current user identity and bearer token, bootstraps them from
//! durable storage at startup, and keeps storage in sync on login/logout.
//! Invariant: user and token are both present or both absent, never
//! partially set.
//!
//! The bearer token is wrapped in [`SecretString`] in memory so it stays
//! out of `Debug` output; at rest it lives in the plain-text token slot
//! (localStorage semantics).

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use shopfront_core::auth::{LoginRequest, SignupRequest, User};

use crate::api::{ApiClient, ApiError};
use crate::storage::{Storage, keys};

/// Callback invoked after every session state change with the new
/// identity (`None` when logged out).
pub type SessionSubscriber = Box<dyn Fn(Option<&User>) + Send + Sync>;

/// Current-user identity plus bearer credential, mirrored to storage.
pub struct SessionManager {
    api: ApiClient,
    storage: Arc<dyn Storage>,
    user: Option<User>,
    token: Option<SecretString>,
    subscribers: Vec<SessionSubscriber>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create an empty (unauthenticated) session.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn Storage>) -> Self {
        Self {
            api,
            storage,
            user: None,
            token: None,
            subscribers: Vec::new(),
        }
    }

    /// Restore a persisted session, if both slots are present and parse.
    ///
    /// Runs once at startup; no network call. A lone token or a lone user
    /// snapshot leaves the session unauthenticated.
    #[instrument(skip(self))]
    pub fn bootstrap(&mut self) {
        let stored_token = self.storage.get(keys::TOKEN);
        let stored_user = self.storage.get(keys::USER);

        let (Some(token), Some(user_json)) = (stored_token, stored_user) else {
            return;
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => {
                tracing::debug!(username = %user.username, "Restored persisted session");
                self.user = Some(user);
                self.token = Some(SecretString::from(token));
                self.notify();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted user snapshot did not parse; staying logged out");
            }
        }
    }

    /// Sign in against the identity service.
    ///
    /// On success the in-memory session is replaced wholesale and both
    /// storage slots are rewritten. On failure the prior session state is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Propagates the transport/validation error from the identity service.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let response = self.api.signin(credentials).await?;

        let token = response.token.clone();
        let user = response.into_user();

        // Persist before exposing the new state; the API client reads the
        // token slot on every subsequent request.
        self.storage.set(keys::TOKEN, &token);
        match serde_json::to_string(&user) {
            Ok(json) => self.storage.set(keys::USER, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize user snapshot"),
        }

        self.token = Some(SecretString::from(token));
        self.user = Some(user.clone());
        self.notify();

        Ok(user)
    }

    /// Register a new account. Does not mutate session state; the user
    /// must still log in.
    ///
    /// # Errors
    ///
    /// Propagates the transport/validation error from the identity service.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn register(&self, new_user: &SignupRequest) -> Result<String, ApiError> {
        let response = self.api.signup(new_user).await?;
        Ok(response.message)
    }

    /// Clear the session and remove both storage slots.
    ///
    /// Always succeeds; no network effect.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.storage.remove(keys::TOKEN);
        self.storage.remove(keys::USER);
        self.notify();
    }

    /// True iff a user is currently set.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The in-memory bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Register a subscriber notified after every state change.
    pub fn subscribe(&mut self, subscriber: SessionSubscriber) {
        self.subscribers.push(subscriber);
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(self.user.as_ref());
        }
    }
}
