use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, header::CONTENT_LENGTH};
use serde::de::DeserializeOwned;

use super::SpotifyApi;
use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    types::{
        ApiErrorResponse, Artist, Device, DevicesResponse, Page, PlayHistory, PlaybackState,
        Playlist, SearchResponse, TimeRange, Token, Track, UserProfile,
    },
};

/// reqwest-backed [`SpotifyApi`].
///
/// One instance is shared by every request; it carries no user state. The
/// user's token is passed in per call.
pub struct SpotifyClient {
    pub(super) http: Client,
    pub(super) config: Arc<Config>,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await?;

        let response = check_response(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// GET for endpoints that answer `204 No Content` when there is nothing
    /// to report.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
    ) -> ApiResult<Option<T>> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = check_response(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Body-less player command.
    async fn command(&self, method: Method, access_token: &str, path: &str) -> ApiResult<()> {
        let response = self
            .http
            .request(method, self.url(path))
            .bearer_auth(access_token)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;

        check_response(response).await?;
        Ok(())
    }
}

/// Turns non-2xx responses into [`ApiError::Spotify`], using the Web API's
/// `{"error": {"status", "message"}}` object when present.
async fn check_response(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(err) => err.error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body,
    };

    Err(ApiError::Spotify {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> ApiResult<Token> {
        self.exchange_code_for_token(code).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> ApiResult<Token> {
        self.refresh_access_token(refresh_token).await
    }

    async fn current_user(&self, access_token: &str) -> ApiResult<UserProfile> {
        self.get(access_token, "/me", &[]).await
    }

    async fn currently_playing(&self, access_token: &str) -> ApiResult<Option<PlaybackState>> {
        self.get_optional(access_token, "/me/player/currently-playing")
            .await
    }

    async fn current_playback(&self, access_token: &str) -> ApiResult<Option<PlaybackState>> {
        self.get_optional(access_token, "/me/player").await
    }

    async fn playlists(&self, access_token: &str, limit: u32) -> ApiResult<Page<Playlist>> {
        self.get(access_token, "/me/playlists", &[("limit", limit.to_string())])
            .await
    }

    async fn devices(&self, access_token: &str) -> ApiResult<Vec<Device>> {
        let res: DevicesResponse = self.get(access_token, "/me/player/devices", &[]).await?;
        Ok(res.devices)
    }

    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> ApiResult<Vec<Track>> {
        let res: SearchResponse = self
            .get(
                access_token,
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(res.tracks.items)
    }

    async fn top_tracks(
        &self,
        access_token: &str,
        range: TimeRange,
        limit: u32,
    ) -> ApiResult<Vec<Track>> {
        let page: Page<Track> = self
            .get(
                access_token,
                "/me/top/tracks",
                &[
                    ("time_range", range.as_str().to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    async fn top_artists(
        &self,
        access_token: &str,
        range: TimeRange,
        limit: u32,
    ) -> ApiResult<Vec<Artist>> {
        let page: Page<Artist> = self
            .get(
                access_token,
                "/me/top/artists",
                &[
                    ("time_range", range.as_str().to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> ApiResult<Vec<PlayHistory>> {
        let page: Page<PlayHistory> = self
            .get(
                access_token,
                "/me/player/recently-played",
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(page.items)
    }

    async fn pause(&self, access_token: &str) -> ApiResult<()> {
        self.command(Method::PUT, access_token, "/me/player/pause")
            .await
    }

    async fn resume(&self, access_token: &str) -> ApiResult<()> {
        self.command(Method::PUT, access_token, "/me/player/play")
            .await
    }

    async fn next_track(&self, access_token: &str) -> ApiResult<()> {
        self.command(Method::POST, access_token, "/me/player/next")
            .await
    }

    async fn previous_track(&self, access_token: &str) -> ApiResult<()> {
        self.command(Method::POST, access_token, "/me/player/previous")
            .await
    }
}
