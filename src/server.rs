use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::{
    Res, api,
    config::Config,
    info,
    session::{SessionStore, signing_key},
    spotify::SpotifyApi,
    types::RouteTableRow,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: Arc<dyn SpotifyApi>,
    pub sessions: Arc<dyn SessionStore>,
    key: Key,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        spotify: Arc<dyn SpotifyApi>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let key = signing_key(&config.secret_key);
        Self {
            config,
            spotify,
            sessions,
            key,
        }
    }
}

// SignedCookieJar pulls its key out of the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub auth: &'static str,
    pub description: &'static str,
}

pub const ROUTES: &[RouteInfo] = &[
    RouteInfo { method: "GET", path: "/", auth: "none", description: "Landing page; forwards a `code` to /callback" },
    RouteInfo { method: "GET", path: "/health", auth: "none", description: "Status and version" },
    RouteInfo { method: "GET", path: "/login", auth: "none", description: "Redirect to Spotify authorization" },
    RouteInfo { method: "GET", path: "/callback", auth: "none", description: "OAuth callback, starts the session" },
    RouteInfo { method: "GET", path: "/dashboard", auth: "session", description: "Now playing, profile, devices, playlists" },
    RouteInfo { method: "GET", path: "/search?q=", auth: "session", description: "Track search" },
    RouteInfo { method: "GET", path: "/stats", auth: "session", description: "Top tracks and artists, short and medium term" },
    RouteInfo { method: "GET", path: "/top-artists", auth: "session", description: "Top 20 artists, medium term" },
    RouteInfo { method: "GET", path: "/top-tracks", auth: "session", description: "Top 25 tracks, medium term" },
    RouteInfo { method: "GET", path: "/recent", auth: "session", description: "Last 30 played tracks" },
    RouteInfo { method: "POST", path: "/api/toggle-playback", auth: "session+premium", description: "Pause or resume playback" },
    RouteInfo { method: "POST", path: "/api/next-track", auth: "session+premium", description: "Skip to next track" },
    RouteInfo { method: "POST", path: "/api/previous-track", auth: "session+premium", description: "Skip to previous track" },
    RouteInfo { method: "GET", path: "/logout", auth: "none", description: "Clear the session" },
];

pub fn route_table_rows() -> Vec<RouteTableRow> {
    ROUTES
        .iter()
        .map(|r| RouteTableRow {
            method: r.method.to_string(),
            path: r.path.to_string(),
            auth: r.auth.to_string(),
            description: r.description.to_string(),
        })
        .collect()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/dashboard", get(api::dashboard))
        .route("/search", get(api::search))
        .route("/stats", get(api::stats))
        .route("/top-artists", get(api::top_artists))
        .route("/top-tracks", get(api::top_tracks))
        .route("/recent", get(api::recent))
        .route("/api/toggle-playback", post(api::toggle_playback))
        .route("/api/next-track", post(api::next_track))
        .route("/api/previous-track", post(api::previous_track))
        .route("/logout", get(api::logout))
        .with_state(state)
}

/// Binds the configured address and serves until the process ends.
pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_address)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
