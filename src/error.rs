//! Error types for remote calls and configuration.

/// A failed call to Spotify (accounts service or Web API).
///
/// Handlers match on it to pick a response: pages render the message, the
/// playback controls put it in the JSON `error` field, and the callback shows
/// it on the login error page.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: DNS, TLS, connection reset, timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx body that did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx answer from the Web API, with Spotify's own message when the
    /// body carried one.
    #[error("Spotify API error: {status} - {message}")]
    Spotify { status: u16, message: String },

    /// The token endpoint rejected a code or refresh token.
    #[error("Authorization failed: {0}")]
    Authorization(String),
}

impl ApiError {
    /// Short machine-readable label, used in log lines.
    pub fn kind(&self) -> &str {
        match self {
            ApiError::Http(_) => "http",
            ApiError::Json(_) => "json",
            ApiError::Spotify { .. } => "spotify_api",
            ApiError::Authorization(_) => "authorization",
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Invalid start-up configuration. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank. Carries the variable name.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A URL variable that does not parse. Carries the variable name and the
    /// parser's message.
    #[error("{0} is not a valid URL: {1}")]
    InvalidUrl(&'static str, String),
}
