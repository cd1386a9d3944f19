//! Session lifecycle: token acquisition, persistence, and login state.

use crate::types::{RegisterUser, User};
use crate::{Error, SustainClient};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// Persistence seam for the opaque session token. The session store is the
/// only writer; presentation code never touches the persisted token directly.
pub trait TokenStore {
    /// Returns the persisted token, if one exists.
    fn load(&self) -> Option<String>;

    /// Persists the token, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the token cannot be written to storage.
    fn save(&self, token: &str) -> io::Result<()>;

    /// Removes the persisted token. Clearing is best-effort and infallible.
    fn clear(&self);
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        (**self).save(token)
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// In-process token store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Where the session stands in its lifecycle. A user profile is held only in
/// `Authenticated`, and only after the token was validated against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated(User),
    Anonymous,
}

/// The authentication store: holds the current token and resolved user
/// profile, and owns every persisted-token write.
pub struct Session<S: TokenStore> {
    client: Arc<SustainClient>,
    tokens: S,
    state: SessionState,
}

impl<S: TokenStore> Session<S> {
    #[must_use]
    pub fn new(client: Arc<SustainClient>, tokens: S) -> Self {
        Self {
            client,
            tokens,
            state: SessionState::Uninitialized,
        }
    }

    /// Resolves any persisted token into a login state. With no persisted
    /// token this transitions straight to `Anonymous` without a network
    /// call. A token the backend rejects is discarded silently; repeating
    /// startup afterwards behaves as if no token existed.
    pub async fn init(&mut self) {
        let Some(token) = self.tokens.load() else {
            self.state = SessionState::Anonymous;
            return;
        };
        self.state = SessionState::Loading;
        self.client.set_token(Some(token));
        match self.client.current_user().await {
            Ok(user) => self.state = SessionState::Authenticated(user),
            Err(err) => {
                tracing::warn!("discarding persisted session token: {err}");
                self.tokens.clear();
                self.client.set_token(None);
                self.state = SessionState::Anonymous;
            }
        }
    }

    /// Signs in. On success the token has been persisted and the user
    /// profile fetched before this returns, so a caller observing `Ok` can
    /// rely on [`is_authenticated`](Self::is_authenticated). On failure the
    /// session is left signed out and the error carries the backend's
    /// message, or "Login failed" when it supplied none.
    ///
    /// # Errors
    /// Returns an error if the credentials are rejected, the token cannot be
    /// persisted, or the user profile cannot be fetched with the new token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), Error> {
        let token = self
            .client
            .login(username, password)
            .await
            .map_err(|err| err.with_detail_fallback("Login failed"))?;
        self.tokens.save(&token.access_token)?;
        self.client.set_token(Some(token.access_token));
        match self.client.current_user().await {
            Ok(user) => {
                self.state = SessionState::Authenticated(user);
                Ok(())
            }
            Err(err) => {
                self.tokens.clear();
                self.client.set_token(None);
                self.state = SessionState::Anonymous;
                Err(err.with_detail_fallback("Login failed"))
            }
        }
    }

    /// Registers an account without signing in; callers route to
    /// [`login`](Self::login) afterwards.
    ///
    /// # Errors
    /// Returns the backend's message, or "Registration failed" when it
    /// supplied none.
    pub async fn register(&self, user: &RegisterUser) -> Result<User, Error> {
        self.client
            .register(user)
            .await
            .map_err(|err| err.with_detail_fallback("Registration failed"))
    }

    /// Signs out synchronously: clears the persisted token and the in-memory
    /// token and user. No backend call is made.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.client.set_token(None);
        self.state = SessionState::Anonymous;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The HTTP client this session attaches its token to, shared with the
    /// data managers.
    #[must_use]
    pub const fn client(&self) -> &Arc<SustainClient> {
        &self.client
    }
}
