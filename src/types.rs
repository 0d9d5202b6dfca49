use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Seconds before the real expiry at which a token is treated as expired.
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 240;

/// OAuth token record held by one session.
///
/// Created by the code exchange, replaced on refresh, dropped on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer token for Web API calls.
    pub access_token: String,
    /// Long-lived token used to obtain a new access token.
    pub refresh_token: String,
    /// Space-separated permissions the user granted.
    pub scope: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
}

impl Token {
    /// Checks expiry against the current time.
    ///
    /// # Returns
    ///
    /// `true` once the token is within [`TOKEN_EXPIRY_BUFFER_SECS`] of its
    /// expiry, so a refresh happens before requests start failing.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Same as [`Token::is_expired`] against an explicit `now` (unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at - TOKEN_EXPIRY_BUFFER_SECS
    }
}

/// Raw body of the token endpoint for both code exchange and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

impl TokenResponse {
    /// Converts into a [`Token`], keeping `previous_refresh` when the provider
    /// did not rotate the refresh token.
    pub fn into_token(self, obtained_at: i64, previous_refresh: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_at: obtained_at + self.expires_in,
        }
    }
}

/// Error body of the token endpoint (`{"error": ..., "error_description": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Error body of the Web API (`{"error": {"status": ..., "message": ...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

/// The signed-in user, from `/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

impl UserProfile {
    /// Playback control needs a Premium subscription. A missing `product`
    /// field (token without `user-read-private`) reads as not premium.
    pub fn is_premium(&self) -> bool {
        self.product.as_deref() == Some("premium")
    }

    /// Display name, falling back to the user id.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// A track as embedded in search results, top lists, play history and
/// playback state. Episodes deserialize too, just without artists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub album: Option<SimplifiedAlbum>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub uri: String,
}

impl Track {
    /// First credited artist, or `"Unknown artist"`.
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("Unknown artist")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Option<PlaylistTracks>,
}

impl Playlist {
    pub fn track_count(&self) -> u64 {
        self.tracks.as_ref().map(|t| t.total).unwrap_or(0)
    }
}

/// A Spotify Connect device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Playback state as returned by `/me/player` and
/// `/me/player/currently-playing`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub progress_ms: Option<u64>,
}

/// Spotify's paging object. Only the first page is ever read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Page<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: String,
}

/// Window for the personalization (top items) endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    /// Value of the `time_range` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "Last 4 weeks",
            TimeRange::MediumTerm => "Last 6 months",
            TimeRange::LongTerm => "All time",
        }
    }
}

/// JSON body of the playback-control endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ControlResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// One row of the `routes` command's table.
#[derive(Tabled)]
pub struct RouteTableRow {
    pub method: String,
    pub path: String,
    pub auth: String,
    pub description: String,
}
