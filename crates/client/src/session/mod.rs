//! Session store: the authenticated identity and its state machine.
//!
//! Three states: Anonymous (initial, and after logout), Authenticating (a
//! login/register call in flight), Authenticated. A successful auth call
//! persists the identity to durable storage and then holds it in memory, so
//! the two never drift; a failed call restores whatever state preceded the
//! attempt and surfaces the service's message.

pub mod storage;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use marketplace_core::{Email, UserId};

use crate::api::ApiClient;
use crate::api::types::AccountPayload;
use crate::error::ClientError;

pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage, StorageError};

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Service-assigned user ID.
    pub user_id: UserId,
    /// Display name.
    pub username: String,
    /// Account email.
    pub email: Email,
    /// Admin capability. Sourced from the service's capability flag when
    /// present; the configured administrator email is only a fallback, and
    /// the service authorizes every admin mutation independently.
    pub is_admin: bool,
}

impl Session {
    fn from_account(account: AccountPayload, admin_email: Option<&Email>) -> Self {
        let is_admin = account
            .is_admin
            .unwrap_or_else(|| admin_email == Some(&account.email));
        Self {
            user_id: account.id,
            username: account.username,
            email: account.email,
            is_admin,
        }
    }
}

/// Authentication state.
#[derive(Debug, Default)]
pub enum SessionState {
    /// No identity; the initial state, and the state after logout.
    #[default]
    Anonymous,
    /// A login or register call is in flight.
    Authenticating,
    /// Signed in.
    Authenticated(Session),
}

/// Owns the session state machine and its durable storage.
pub struct SessionStore {
    state: SessionState,
    storage: Box<dyn SessionStorage>,
    admin_email: Option<Email>,
}

impl SessionStore {
    /// Create a store, hydrating from durable storage.
    ///
    /// Absent or undecodable stored data yields Anonymous.
    #[must_use]
    pub fn hydrate(storage: Box<dyn SessionStorage>, admin_email: Option<Email>) -> Self {
        let state = storage
            .load()
            .map_or(SessionState::Anonymous, SessionState::Authenticated);
        Self {
            state,
            storage,
            admin_email,
        }
    }

    /// The current authentication state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Anonymous | SessionState::Authenticating => None,
        }
    }

    /// Whether a session is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Authenticate with email and password.
    ///
    /// On success the identity is persisted, then held in memory, and
    /// returned. On failure the state preceding the attempt is restored.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] for rejected credentials (service message
    /// verbatim where possible), [`ClientError::Network`] for transport
    /// failures, [`ClientError::Storage`] if the identity cannot be
    /// persisted (the login does not take effect and the prior state is
    /// restored).
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &Email,
        password: &SecretString,
    ) -> Result<Session, ClientError> {
        let previous = std::mem::replace(&mut self.state, SessionState::Authenticating);
        match api.login(email, password).await {
            Ok(account) => self.complete_auth(account, previous),
            Err(err) => {
                self.state = previous;
                Err(ClientError::from_auth_failure(err))
            }
        }
    }

    /// Register a new account and sign in as it.
    ///
    /// Same state handling as [`SessionStore::login`].
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    #[instrument(skip_all, fields(email = %email))]
    pub async fn register(
        &mut self,
        api: &ApiClient,
        username: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<Session, ClientError> {
        let previous = std::mem::replace(&mut self.state, SessionState::Authenticating);
        match api.register(username, email, password).await {
            Ok(account) => self.complete_auth(account, previous),
            Err(err) => {
                self.state = previous;
                Err(ClientError::from_auth_failure(err))
            }
        }
    }

    /// Sign out. Clears the in-memory and persisted identity unconditionally;
    /// cannot fail.
    pub fn logout(&mut self) {
        self.state = SessionState::Anonymous;
        self.storage.clear();
        info!("signed out");
    }

    /// Persist-then-hold: storage is written before the in-memory transition
    /// so memory never gets ahead of the durable copy. A rejected write
    /// restores the state preceding the attempt — the old document is still
    /// what is on disk, and a write that did corrupt it hydrates to Anonymous
    /// on the next startup anyway.
    fn complete_auth(
        &mut self,
        account: AccountPayload,
        previous: SessionState,
    ) -> Result<Session, ClientError> {
        let session = Session::from_account(account, self.admin_email.as_ref());
        if let Err(err) = self.storage.save(&session) {
            warn!(error = %err, "could not persist session; restoring prior state");
            self.state = previous;
            return Err(err.into());
        }
        info!(user_id = %session.user_id, "signed in");
        self.state = SessionState::Authenticated(session.clone());
        Ok(session)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}
