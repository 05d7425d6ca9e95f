use parking_lot::{Mutex, RwLock};
use reqwest::StatusCode;
use std::sync::Arc;

use crate::{
    auth::{AuthApiState, LoginRequest, SessionProfile},
    client::UnauthorizedListener,
    credential,
    error::ConsoleResult,
    navigation::NavigatorState,
    routes::public::LOGIN_PATH,
    storage::{KeyValueStore, PROFILE_KEY, StorageState, TOKEN_KEY},
};

/// SessionState
///
/// The authoritative record of who is signed in. `is_admin` is derived from the
/// credential's role set and is false whenever `token` is empty; `profile` is only
/// present alongside a non-empty token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: String,
    pub profile: Option<SessionProfile>,
    pub is_admin: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

/// SessionStore
///
/// Owns the credential lifecycle. State is built once by `restore` and afterwards only
/// changes wholesale through `login` and `logout`; readers get clones, never references
/// into the lock.
pub struct SessionStore {
    storage: StorageState,
    auth: AuthApiState,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// restore
    ///
    /// Rebuilds the session from durable storage. A stored credential always survives
    /// restoration; a profile entry that does not parse is logged and dropped.
    pub fn restore(storage: StorageState, auth: AuthApiState) -> Self {
        let state = restore_state(storage.as_ref());

        tracing::info!(
            authenticated = state.is_authenticated(),
            is_admin = state.is_admin,
            has_profile = state.profile.is_some(),
            "session restored"
        );

        Self {
            storage,
            auth,
            state: RwLock::new(state),
        }
    }

    pub fn token(&self) -> String {
        self.state.read().token.clone()
    }

    pub fn profile(&self) -> Option<SessionProfile> {
        self.state.read().profile.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// A consistent copy of all three fields.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// login
    ///
    /// Exchanges credentials with the authentication collaborator, then persists the
    /// result and swaps all three fields while holding the state lock. On any failure the session (and the
    /// durable entries) are left as they were.
    pub async fn login(&self, username: &str, password: &str) -> ConsoleResult<SessionProfile> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = match self.auth.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(username, error = %e, "login rejected");
                return Err(e);
            }
        };

        let serialized = serde_json::to_string(&response)?;
        let is_admin = credential::is_admin_credential(&response.token);

        // Storage and memory change under one write lock so a concurrent clear is
        // ordered before or after the whole login, never between its halves.
        let mut state = self.state.write();
        self.persist(&response.token, &serialized)?;
        *state = SessionState {
            token: response.token.clone(),
            profile: Some(response.clone()),
            is_admin,
        };
        drop(state);

        tracing::info!(user_id = response.user_id, username = %response.username, is_admin, "login succeeded");
        Ok(response)
    }

    /// logout
    ///
    /// Clears the in-memory session and both durable entries. Idempotent. The in-memory
    /// state is cleared even if storage removal fails; the first storage error is
    /// returned.
    pub fn logout(&self) -> ConsoleResult<()> {
        let mut state = self.state.write();
        let previous = std::mem::take(&mut *state);
        if previous.is_authenticated() {
            tracing::info!("session cleared");
        }

        let token_removed = self.storage.remove(TOKEN_KEY);
        let profile_removed = self.storage.remove(PROFILE_KEY);
        token_removed.and(profile_removed)
    }

    fn persist(&self, token: &str, profile: &str) -> ConsoleResult<()> {
        let previous_token = self.storage.get(TOKEN_KEY);
        let previous_profile = self.storage.get(PROFILE_KEY);

        let written = self
            .storage
            .set(TOKEN_KEY, token)
            .and_then(|_| self.storage.set(PROFILE_KEY, profile));

        if let Err(e) = written {
            tracing::error!(error = %e, "failed to persist session, rolling back storage");
            put_back(self.storage.as_ref(), TOKEN_KEY, previous_token);
            put_back(self.storage.as_ref(), PROFILE_KEY, previous_profile);
            return Err(e);
        }
        Ok(())
    }
}

fn restore_state(storage: &dyn KeyValueStore) -> SessionState {
    let Some(token) = storage.get(TOKEN_KEY).filter(|token| !token.is_empty()) else {
        return SessionState::default();
    };

    let is_admin = credential::roles_of(&token).is_admin();

    let profile = storage
        .get(PROFILE_KEY)
        .and_then(|raw| match serde_json::from_str::<SessionProfile>(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::error!(error = %e, "failed to parse profile from storage");
                None
            }
        });

    SessionState {
        token,
        profile,
        is_admin,
    }
}

fn put_back(storage: &dyn KeyValueStore, key: &str, value: Option<String>) {
    let outcome = match value {
        Some(value) => storage.set(key, &value),
        None => storage.remove(key),
    };
    if let Err(e) = outcome {
        tracing::error!(key, error = %e, "storage rollback failed");
    }
}

/// SessionInvalidator
///
/// Reacts to 401/403 responses from the request pipeline: clears the session and
/// sends the navigator to the login surface unless it is already there.
///
/// The whole sequence runs under one lock, so a burst of failing in-flight requests
/// produces a single clear and a single redirect; later notifications find the
/// session empty and the navigator already on the login page.
pub struct SessionInvalidator {
    session: Arc<SessionStore>,
    navigator: NavigatorState,
    serial: Mutex<()>,
}

impl SessionInvalidator {
    pub fn new(session: Arc<SessionStore>, navigator: NavigatorState) -> Self {
        Self {
            session,
            navigator,
            serial: Mutex::new(()),
        }
    }
}

impl UnauthorizedListener for SessionInvalidator {
    fn on_unauthorized(&self, status: StatusCode) {
        let _serial = self.serial.lock();

        if let Err(e) = self.session.logout() {
            tracing::error!(%status, error = %e, "forced session clear could not reach storage");
        }

        let current = self.navigator.current();
        let current_path = current.split('?').next().unwrap_or_default();
        if current_path != LOGIN_PATH {
            tracing::warn!(%status, from = %current, "session invalidated, redirecting to login");
            self.navigator.push(LOGIN_PATH);
        }
    }
}
