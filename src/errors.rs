use reqwest::StatusCode;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout, broken body stream).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The token endpoint rejected a login or refresh.
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("malformed token: {0}")]
    Token(String),
    #[error("no refresh token stored")]
    MissingRefreshToken,
    /// A 401 that survived the refresh attempt, as seen by the typed task calls.
    #[error("unauthorized (401): {body}")]
    Unauthorized { body: String },
    #[error("server error ({status}): {body}")]
    Server { status: StatusCode, body: String },
}

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }
}
