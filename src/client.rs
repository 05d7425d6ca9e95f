use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::{Arc, Weak};
use tracing::Instrument;

use crate::{
    config::AppConfig,
    error::{ConsoleError, ConsoleResult},
    storage::{StorageState, TOKEN_KEY},
};

/// Envelope code reported by the backend on success.
pub const SUCCESS_CODE: &str = "OK";

/// ApiResult
///
/// The uniform response envelope `{code, message, data}` returned by every endpoint.
/// `data` is absent or null for endpoints that return nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResult<T> {
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn is_ok(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Translates a non-OK code into `ConsoleError::Api` carrying the server message.
    pub fn into_result(self) -> ConsoleResult<Option<T>> {
        if self.is_ok() {
            Ok(self.data)
        } else {
            Err(ConsoleError::Api {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// Like `into_result`, but a successful envelope must carry data.
    pub fn into_data(self) -> ConsoleResult<T> {
        self.into_result()?.ok_or(ConsoleError::MissingData)
    }

    /// For endpoints whose payload is irrelevant.
    pub fn check(self) -> ConsoleResult<()> {
        self.into_result().map(|_| ())
    }
}

/// UnauthorizedListener
///
/// Observer notified whenever a response comes back 401 or 403. Notification happens
/// before the error is handed to the caller; the listener owns the reaction (clearing
/// the session, redirecting). It may be invoked several times for one burst of failing
/// requests and must tolerate that.
pub trait UnauthorizedListener: Send + Sync {
    fn on_unauthorized(&self, status: StatusCode);
}

/// ApiClient
///
/// The request pipeline. Every outbound call carries `Authorization: Bearer <token>`
/// read from durable storage at send time (omitted when no credential is stored), and
/// every response is inspected for authorization failures before it reaches the caller.
///
/// Cloning is cheap; clones share the HTTP connection pool and the listener list.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: StorageState,
    listeners: Arc<RwLock<Vec<Weak<dyn UnauthorizedListener>>>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, storage: StorageState) -> ConsoleResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            storage,
            listeners: Arc::new(RwLock::new(Vec::new())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers an observer for authorization failures. Only a weak reference is kept,
    /// so a listener that itself owns this client does not leak.
    pub fn subscribe<L: UnauthorizedListener + 'static>(&self, listener: &Arc<L>) {
        let weak: Weak<dyn UnauthorizedListener> = Arc::downgrade(listener) as Weak<dyn UnauthorizedListener>;
        self.listeners.write().push(weak);
    }

    /// Builds a request for `path` (relative to the base URL) with the credential
    /// header attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));

        match self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// send
    ///
    /// Executes the request and applies the response policy:
    /// - 401/403: listeners are notified, then `ConsoleError::Unauthorized` is returned.
    /// - any other non-success status: `ConsoleError::Status`.
    /// - success: the response is handed back untouched.
    pub async fn send(&self, builder: RequestBuilder) -> ConsoleResult<Response> {
        self.execute(builder, true).await
    }

    /// Like `send`, but a 401/403 is returned without notifying listeners. For requests
    /// whose rejection says nothing about the stored session, such as the login call.
    pub async fn send_unguarded(&self, builder: RequestBuilder) -> ConsoleResult<Response> {
        self.execute(builder, false).await
    }

    /// call
    ///
    /// Sends a request and decodes the envelope. The envelope code is NOT checked here;
    /// each endpoint wrapper decides via `into_data`/`check`.
    pub async fn call<T, F>(&self, method: Method, path: &str, configure: F) -> ConsoleResult<ApiResult<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        self.dispatch(method, path, configure, true).await
    }

    /// `call` over `send_unguarded`.
    pub async fn call_unguarded<T, F>(&self, method: Method, path: &str, configure: F) -> ConsoleResult<ApiResult<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        self.dispatch(method, path, configure, false).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<ApiResult<T>> {
        self.call(Method::GET, path, |b| b).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ConsoleResult<ApiResult<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.call(Method::GET, path, |b| b.query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ConsoleResult<ApiResult<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, |b| b.json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ConsoleResult<ApiResult<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, |b| b.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<ApiResult<T>> {
        self.call(Method::DELETE, path, |b| b).await
    }

    async fn execute(&self, builder: RequestBuilder, guarded: bool) -> ConsoleResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if guarded {
                tracing::warn!(%status, url = %response.url(), "credential rejected by backend");
                self.notify_unauthorized(status);
            }
            return Err(ConsoleError::Unauthorized(status));
        }

        if !status.is_success() {
            return Err(ConsoleError::Status(status));
        }

        Ok(response)
    }

    async fn dispatch<T, F>(&self, method: Method, path: &str, configure: F, guarded: bool) -> ConsoleResult<ApiResult<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let span = tracing::info_span!("api_request", method = %method, path = %path);

        async move {
            let builder = configure(self.request(method, path));
            let response = self.execute(builder, guarded).await?;
            let envelope = response.json::<ApiResult<T>>().await?;
            tracing::debug!(code = %envelope.code, "envelope received");
            Ok(envelope)
        }
        .instrument(span)
        .await
    }

    fn notify_unauthorized(&self, status: StatusCode) {
        // Upgrade under the lock, call outside it: a listener may subscribe in turn.
        let listeners: Vec<Arc<dyn UnauthorizedListener>> = {
            let mut guard = self.listeners.write();
            guard.retain(|weak| weak.strong_count() > 0);
            guard.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in listeners {
            listener.on_unauthorized(status);
        }
    }
}
