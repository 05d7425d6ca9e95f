use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the console client.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Transport failure (connection refused, deadline exceeded, undecodable body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status other than 401/403.
    #[error("unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// The backend rejected the credential. The session has already been cleared.
    #[error("session rejected by server: {0}")]
    Unauthorized(StatusCode),

    /// The response envelope carried a non-OK code.
    #[error("{message}")]
    Api { code: String, message: String },

    /// The login collaborator refused the credentials.
    #[error("{0}")]
    LoginFailed(String),

    /// The envelope reported success but carried no payload.
    #[error("response envelope carried no data")]
    MissingData,

    /// The router could not settle on a location.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Durable storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;
