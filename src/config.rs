//! Configuration management for the Spotify dashboard.
//!
//! Configuration is read once at start-up into an immutable [`Config`] which
//! the router shares with every handler. Values come from the environment,
//! optionally primed from a `.env` file:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory, else `.env` in the local data directory
//! 3. Application defaults (where applicable)

use std::{collections::BTreeSet, env, path::PathBuf};

use reqwest::Url;

use crate::error::ConfigError;

pub const CLIENT_ID_VAR: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "SPOTIFY_API_REDIRECT_URI";
pub const SCOPE_VAR: &str = "SPOTIFY_API_AUTH_SCOPE";
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
pub const SERVER_ADDRESS_VAR: &str = "SERVER_ADDRESS";
pub const AUTH_URL_VAR: &str = "SPOTIFY_API_AUTH_URL";
pub const TOKEN_URL_VAR: &str = "SPOTIFY_API_TOKEN_URL";
pub const API_URL_VAR: &str = "SPOTIFY_API_URL";

pub const DEFAULT_SECRET_KEY: &str = "your-secret-key";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-read-playback-state user-modify-playback-state \
    user-read-currently-playing user-top-read user-read-recently-played \
    playlist-read-private user-read-private";

/// Loads environment variables from a `.env` file.
///
/// Looks in the working directory first and falls back to
/// `<local data dir>/spotdash/.env` (e.g. `~/.local/share/spotdash/.env` on
/// Linux), creating that directory if needed. Variables already present in the
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or no
/// `.env` file could be loaded from either location. Callers treat this as a
/// warning; the environment alone may be enough.
pub async fn load_env() -> Result<PathBuf, String> {
    if let Ok(path) = dotenv::dotenv() {
        return Ok(path);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdash/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path)
        .map(|_| path.clone())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// OAuth client credentials registered with Spotify.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: BTreeSet<String>,
}

impl Credentials {
    /// Scopes joined the way the authorize endpoint expects them.
    pub fn scope_param(&self) -> String {
        self.scope.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub secret_key: String,
    pub server_address: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    authorize_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. The authorization URL is assembled and
    /// validated here so a bad `SPOTIFY_API_AUTH_URL` fails at start-up rather
    /// than on the first login.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let scope_raw = get(SCOPE_VAR).unwrap_or_else(|| DEFAULT_SCOPE.to_string());
        let credentials = Credentials {
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
            redirect_uri: require(REDIRECT_URI_VAR)?,
            scope: parse_scope(&scope_raw),
        };

        let auth_url = get(AUTH_URL_VAR).unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
        let authorize_url = Url::parse_with_params(
            &auth_url,
            &[
                ("client_id", credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", credentials.redirect_uri.as_str()),
                ("scope", credentials.scope_param().as_str()),
            ],
        )
        .map_err(|e| ConfigError::InvalidUrl(AUTH_URL_VAR, e.to_string()))?
        .to_string();

        Ok(Self {
            credentials,
            secret_key: get(SECRET_KEY_VAR).unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            server_address: get(SERVER_ADDRESS_VAR)
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            auth_url,
            token_url: get(TOKEN_URL_VAR).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get(API_URL_VAR)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            authorize_url,
        })
    }

    /// The provider URL `/login` redirects to.
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    /// True while the insecure development signing secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Session cookies are only marked `Secure` when served over https.
    pub fn secure_cookies(&self) -> bool {
        self.credentials.redirect_uri.starts_with("https://")
    }
}

/// Splits a scope list on commas and whitespace into a set.
pub fn parse_scope(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
