use std::sync::Arc;

// --- Module Structure ---

// Session/authorization core.
pub mod auth;
pub mod client;
pub mod credential;
pub mod guard;
pub mod navigation;
pub mod session;
pub mod storage;

// Configuration and shared error type.
pub mod config;
pub mod error;

// Console route table and router.
pub mod routes;

// Admin endpoint wrappers and their payloads.
pub mod admin;
pub mod models;

// --- Public Re-exports ---

pub use auth::{AuthApi, AuthApiState, AuthResponse, HttpAuthApi, LoginRequest, SessionProfile};
pub use client::{ApiClient, ApiResult, UnauthorizedListener};
pub use config::{AppConfig, Env};
pub use error::{ConsoleError, ConsoleResult};
pub use navigation::{HistoryNavigator, Navigator, NavigatorState};
pub use routes::{ConsoleRouter, RouteLocation};
pub use session::{SessionInvalidator, SessionState, SessionStore};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageState};

/// Console
///
/// Single container for everything the console needs: configuration, durable storage,
/// the request pipeline, the session store, the navigator and the router. Cloning
/// shares the same underlying components.
///
/// Wiring: the session store delegates login to the authentication collaborator; the
/// `SessionInvalidator` is subscribed to the pipeline so that a 401/403 on any request
/// clears the session and redirects to the login page.
#[derive(Clone)]
pub struct Console {
    pub config: AppConfig,
    pub storage: StorageState,
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub navigator: NavigatorState,
    pub router: Arc<ConsoleRouter>,
    // Held here because the pipeline only keeps a weak reference.
    _invalidator: Arc<SessionInvalidator>,
}

impl Console {
    /// open
    ///
    /// Production wiring: file-backed storage at `config.storage_path` and the HTTP
    /// login endpoint.
    pub fn open(config: AppConfig, navigator: NavigatorState) -> ConsoleResult<Self> {
        let storage: StorageState = Arc::new(FileStorage::open(&config.storage_path)?);
        Self::new(config, storage, navigator)
    }

    /// Uses the backend's login endpoint as the authentication collaborator.
    pub fn new(config: AppConfig, storage: StorageState, navigator: NavigatorState) -> ConsoleResult<Self> {
        let client = ApiClient::new(&config, storage.clone())?;
        let auth: AuthApiState = Arc::new(HttpAuthApi::new(client.clone()));
        Ok(Self::assemble(config, storage, navigator, client, auth))
    }

    /// Uses a caller-supplied authentication collaborator.
    pub fn with_auth(
        config: AppConfig,
        storage: StorageState,
        navigator: NavigatorState,
        auth: AuthApiState,
    ) -> ConsoleResult<Self> {
        let client = ApiClient::new(&config, storage.clone())?;
        Ok(Self::assemble(config, storage, navigator, client, auth))
    }

    fn assemble(
        config: AppConfig,
        storage: StorageState,
        navigator: NavigatorState,
        client: ApiClient,
        auth: AuthApiState,
    ) -> Self {
        let session = Arc::new(SessionStore::restore(storage.clone(), auth));

        let invalidator = Arc::new(SessionInvalidator::new(session.clone(), navigator.clone()));
        client.subscribe(&invalidator);

        let router = Arc::new(ConsoleRouter::new(session.clone(), navigator.clone()));

        Self {
            config,
            storage,
            client,
            session,
            navigator,
            router,
            _invalidator: invalidator,
        }
    }

    /// login
    ///
    /// Signs in and, on success, continues to the destination remembered by the login
    /// page (or the dashboard).
    pub async fn login(&self, username: &str, password: &str) -> ConsoleResult<RouteLocation> {
        self.session.login(username, password).await?;
        self.router.resume_after_login()
    }

    /// Signs out and lands on the login page.
    pub fn logout(&self) -> ConsoleResult<RouteLocation> {
        self.session.logout()?;
        self.router.push(routes::public::LOGIN_PATH)
    }

    /// Navigates through the guard.
    pub fn navigate(&self, path: &str) -> ConsoleResult<RouteLocation> {
        self.router.push(path)
    }
}
