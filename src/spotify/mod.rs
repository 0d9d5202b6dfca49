//! # Spotify Integration Module
//!
//! The remote side of the dashboard. Handlers never talk HTTP to Spotify
//! directly; they go through the [`SpotifyApi`] trait so the transport can be
//! swapped (the reqwest-backed [`SpotifyClient`] in production, an in-memory
//! double in tests).
//!
//! ```text
//! Route handlers
//!      ↓
//! AuthenticatedClient (token bound)
//!      ↓
//! SpotifyApi ── SpotifyClient (reqwest, JSON)
//!      ↓
//! Spotify Accounts service / Web API
//! ```
//!
//! ## API Coverage
//!
//! ### Authentication
//! - `POST /api/token` - Authorization code exchange and token refresh
//!
//! ### User Data
//! - `GET /me` - Profile, including the subscription `product`
//! - `GET /me/playlists` - User's playlists
//! - `GET /me/top/{tracks,artists}` - Top items per time range
//! - `GET /me/player/recently-played` - Play history
//!
//! ### Player
//! - `GET /me/player`, `GET /me/player/currently-playing`, `GET /me/player/devices`
//! - `PUT /me/player/{play,pause}`, `POST /me/player/{next,previous}`
//!
//! ### Search
//! - `GET /search?type=track`
//!
//! No call is retried. A failure is returned to the handler as an
//! [`ApiError`](crate::error::ApiError) and ends that request.

mod auth;
mod client;

pub use client::SpotifyClient;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::ApiResult,
    types::{
        Artist, Device, Page, PlayHistory, PlaybackState, Playlist, TimeRange, Token, Track,
        UserProfile,
    },
    warning,
};

/// Everything the dashboard asks of Spotify.
///
/// Calls that act on behalf of a user take the bearer `access_token`.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Swaps an authorization code for a token pair.
    async fn exchange_code(&self, code: &str) -> ApiResult<Token>;

    /// Obtains a fresh access token. Keeps `refresh_token` when Spotify does
    /// not rotate it.
    async fn refresh_token(&self, refresh_token: &str) -> ApiResult<Token>;

    async fn current_user(&self, access_token: &str) -> ApiResult<UserProfile>;

    /// `None` when nothing is playing.
    async fn currently_playing(&self, access_token: &str) -> ApiResult<Option<PlaybackState>>;

    /// `None` when there is no active playback session.
    async fn current_playback(&self, access_token: &str) -> ApiResult<Option<PlaybackState>>;

    async fn playlists(&self, access_token: &str, limit: u32) -> ApiResult<Page<Playlist>>;

    async fn devices(&self, access_token: &str) -> ApiResult<Vec<Device>>;

    async fn search_tracks(&self, access_token: &str, query: &str, limit: u32)
    -> ApiResult<Vec<Track>>;

    async fn top_tracks(
        &self,
        access_token: &str,
        range: TimeRange,
        limit: u32,
    ) -> ApiResult<Vec<Track>>;

    async fn top_artists(
        &self,
        access_token: &str,
        range: TimeRange,
        limit: u32,
    ) -> ApiResult<Vec<Artist>>;

    async fn recently_played(&self, access_token: &str, limit: u32)
    -> ApiResult<Vec<PlayHistory>>;

    async fn pause(&self, access_token: &str) -> ApiResult<()>;

    async fn resume(&self, access_token: &str) -> ApiResult<()>;

    async fn next_track(&self, access_token: &str) -> ApiResult<()>;

    async fn previous_track(&self, access_token: &str) -> ApiResult<()>;
}

/// A [`SpotifyApi`] bound to one session's token.
#[derive(Clone)]
pub struct AuthenticatedClient {
    api: Arc<dyn SpotifyApi>,
    token: Token,
}

impl AuthenticatedClient {
    pub fn new(api: Arc<dyn SpotifyApi>, token: Token) -> Self {
        Self { api, token }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Premium entitlement check. Any failure reads as "not premium".
    pub async fn is_premium(&self) -> bool {
        match self.current_user().await {
            Ok(profile) => profile.is_premium(),
            Err(e) => {
                warning!("Premium check failed, treating account as free: {}", e);
                false
            }
        }
    }

    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        self.api.current_user(&self.token.access_token).await
    }

    pub async fn currently_playing(&self) -> ApiResult<Option<PlaybackState>> {
        self.api.currently_playing(&self.token.access_token).await
    }

    pub async fn current_playback(&self) -> ApiResult<Option<PlaybackState>> {
        self.api.current_playback(&self.token.access_token).await
    }

    pub async fn playlists(&self, limit: u32) -> ApiResult<Page<Playlist>> {
        self.api.playlists(&self.token.access_token, limit).await
    }

    pub async fn devices(&self) -> ApiResult<Vec<Device>> {
        self.api.devices(&self.token.access_token).await
    }

    pub async fn search_tracks(&self, query: &str, limit: u32) -> ApiResult<Vec<Track>> {
        self.api
            .search_tracks(&self.token.access_token, query, limit)
            .await
    }

    pub async fn top_tracks(&self, range: TimeRange, limit: u32) -> ApiResult<Vec<Track>> {
        self.api
            .top_tracks(&self.token.access_token, range, limit)
            .await
    }

    pub async fn top_artists(&self, range: TimeRange, limit: u32) -> ApiResult<Vec<Artist>> {
        self.api
            .top_artists(&self.token.access_token, range, limit)
            .await
    }

    pub async fn recently_played(&self, limit: u32) -> ApiResult<Vec<PlayHistory>> {
        self.api
            .recently_played(&self.token.access_token, limit)
            .await
    }

    pub async fn pause(&self) -> ApiResult<()> {
        self.api.pause(&self.token.access_token).await
    }

    pub async fn resume(&self) -> ApiResult<()> {
        self.api.resume(&self.token.access_token).await
    }

    pub async fn next_track(&self) -> ApiResult<()> {
        self.api.next_track(&self.token.access_token).await
    }

    pub async fn previous_track(&self) -> ApiResult<()> {
        self.api.previous_track(&self.token.access_token).await
    }
}
