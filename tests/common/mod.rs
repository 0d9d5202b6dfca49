#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{
        Request, Response,
        header::{COOKIE, LOCATION, SET_COOKIE},
    },
};
use chrono::Utc;
use spotdash::{
    config::Config,
    error::{ApiError, ApiResult},
    server::{self, AppState},
    session::MemorySessionStore,
    spotify::SpotifyApi,
    types::{
        Artist, Device, Page, PlayHistory, PlaybackState, Playlist, PlaylistTracks,
        SimplifiedArtist, TimeRange, Token, Track, UserProfile,
    },
};
use tower::ServiceExt;

/// In-memory Spotify that records every call it receives.
#[derive(Default)]
pub struct MockSpotify {
    pub calls: Mutex<Vec<String>>,
    pub tokens_seen: Mutex<Vec<String>>,
    pub premium: bool,
    /// `None` means nothing is playing.
    pub playing: Option<bool>,
    pub search_results: Vec<Track>,
    /// Method name to error message.
    pub failures: HashMap<&'static str, String>,
    pub issue_expired_tokens: bool,
    /// The token endpoint rejects every refresh.
    pub reject_refresh: bool,
}

impl MockSpotify {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String, access_token: Option<&str>) -> ApiResult<()> {
        let name = call.split(':').next().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(call);
        if let Some(token) = access_token {
            self.tokens_seen.lock().unwrap().push(token.to_string());
        }
        match self.failures.get(name.as_str()) {
            Some(message) => Err(ApiError::Spotify {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn playback(&self) -> Option<PlaybackState> {
        self.playing.map(|is_playing| PlaybackState {
            is_playing,
            item: Some(track("Now Song", "Now Artist")),
            ..Default::default()
        })
    }

    fn token(&self, access_token: &str) -> Token {
        let now = Utc::now().timestamp();
        Token {
            access_token: access_token.to_string(),
            refresh_token: "refresh-token".to_string(),
            scope: "user-read-private".to_string(),
            expires_at: if self.issue_expired_tokens { now - 10 } else { now + 3600 },
        }
    }
}

#[async_trait]
impl SpotifyApi for MockSpotify {
    async fn exchange_code(&self, code: &str) -> ApiResult<Token> {
        self.calls.lock().unwrap().push(format!("exchange_code:{}", code));
        if code == "bad-code" {
            return Err(ApiError::Authorization("Invalid authorization code".to_string()));
        }
        Ok(self.token(&format!("access-{}", code)))
    }

    async fn refresh_token(&self, refresh_token: &str) -> ApiResult<Token> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("refresh_token:{}", refresh_token));
        if self.reject_refresh {
            return Err(ApiError::Authorization("Refresh token revoked".to_string()));
        }
        let now = Utc::now().timestamp();
        Ok(Token {
            access_token: "refreshed-access".to_string(),
            refresh_token: refresh_token.to_string(),
            scope: "user-read-private".to_string(),
            expires_at: now + 3600,
        })
    }

    async fn current_user(&self, access_token: &str) -> ApiResult<UserProfile> {
        self.record("current_user".to_string(), Some(access_token))?;
        Ok(UserProfile {
            id: "user-1".to_string(),
            display_name: Some("Test User".to_string()),
            product: Some(if self.premium { "premium" } else { "free" }.to_string()),
            ..Default::default()
        })
    }

    async fn currently_playing(&self, access_token: &str) -> ApiResult<Option<PlaybackState>> {
        self.record("currently_playing".to_string(), Some(access_token))?;
        Ok(self.playback())
    }

    async fn current_playback(&self, access_token: &str) -> ApiResult<Option<PlaybackState>> {
        self.record("current_playback".to_string(), Some(access_token))?;
        Ok(self.playback())
    }

    async fn playlists(&self, access_token: &str, limit: u32) -> ApiResult<Page<Playlist>> {
        self.record(format!("playlists:{}", limit), Some(access_token))?;
        Ok(Page {
            items: vec![Playlist {
                id: "pl-1".to_string(),
                name: "Road Trip".to_string(),
                tracks: Some(PlaylistTracks { total: 12 }),
            }],
            total: Some(1),
            next: None,
        })
    }

    async fn devices(&self, access_token: &str) -> ApiResult<Vec<Device>> {
        self.record("devices".to_string(), Some(access_token))?;
        Ok(vec![Device {
            id: Some("dev-1".to_string()),
            name: "Kitchen Speaker".to_string(),
            kind: "Speaker".to_string(),
            is_active: true,
            volume_percent: Some(40),
        }])
    }

    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> ApiResult<Vec<Track>> {
        self.record(format!("search_tracks:{}:{}", query, limit), Some(access_token))?;
        Ok(self.search_results.clone())
    }

    async fn top_tracks(
        &self,
        access_token: &str,
        range: TimeRange,
        limit: u32,
    ) -> ApiResult<Vec<Track>> {
        self.record(
            format!("top_tracks:{}:{}", range.as_str(), limit),
            Some(access_token),
        )?;
        Ok(vec![track("Top Song", "Top Artist")])
    }

    async fn top_artists(
        &self,
        access_token: &str,
        range: TimeRange,
        limit: u32,
    ) -> ApiResult<Vec<Artist>> {
        self.record(
            format!("top_artists:{}:{}", range.as_str(), limit),
            Some(access_token),
        )?;
        Ok(vec![Artist {
            id: "ar-1".to_string(),
            name: "Favourite Band".to_string(),
            genres: vec!["indie".to_string()],
            popularity: Some(70),
        }])
    }

    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> ApiResult<Vec<PlayHistory>> {
        self.record(format!("recently_played:{}", limit), Some(access_token))?;
        Ok(vec![PlayHistory {
            track: track("Old Song", "Old Artist"),
            played_at: "2024-05-01T10:00:00Z".to_string(),
        }])
    }

    async fn pause(&self, access_token: &str) -> ApiResult<()> {
        self.record("pause".to_string(), Some(access_token))
    }

    async fn resume(&self, access_token: &str) -> ApiResult<()> {
        self.record("resume".to_string(), Some(access_token))
    }

    async fn next_track(&self, access_token: &str) -> ApiResult<()> {
        self.record("next_track".to_string(), Some(access_token))
    }

    async fn previous_track(&self, access_token: &str) -> ApiResult<()> {
        self.record("previous_track".to_string(), Some(access_token))
    }
}

pub fn track(name: &str, artist: &str) -> Track {
    Track {
        id: Some(format!("id-{}", name)),
        name: name.to_string(),
        artists: vec![SimplifiedArtist {
            id: None,
            name: artist.to_string(),
        }],
        duration_ms: 185_000,
        ..Default::default()
    }
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SPOTIFY_API_AUTH_CLIENT_ID", "test-client"),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", "test-secret"),
        ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8000/callback"),
        ("SECRET_KEY", "integration-test-secret"),
    ]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub spotify: Arc<MockSpotify>,
    pub sessions: Arc<MemorySessionStore>,
}

impl TestApp {
    pub fn new(spotify: MockSpotify) -> Self {
        let spotify = Arc::new(spotify);
        let sessions = Arc::new(MemorySessionStore::default());
        let state = AppState::new(
            Arc::new(test_config()),
            spotify.clone(),
            sessions.clone(),
        );
        Self {
            router: server::router(state),
            spotify,
            sessions,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.request("GET", uri, cookie).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.request("POST", uri, cookie).await
    }

    /// Completes the OAuth callback and returns the session cookie pair.
    pub async fn sign_in(&self) -> String {
        self.sign_in_with(None).await
    }

    /// Like [`TestApp::sign_in`], sending `cookie` along with the callback.
    pub async fn sign_in_with(&self, cookie: Option<&str>) -> String {
        let res = self.get("/callback?code=good-code", cookie).await;
        assert_eq!(location(&res), "/dashboard");
        set_cookie(&res).expect("callback should set a session cookie")
    }
}

pub fn location(res: &Response<Body>) -> String {
    res.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `name=value` of the first `Set-Cookie` header.
pub fn set_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string())
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
