use spotdash::types::*;
use spotdash::utils::*;

#[test]
fn test_generate_session_id() {
    let id = generate_session_id();

    // Should be exactly SESSION_ID_LEN characters
    assert_eq!(id.len(), SESSION_ID_LEN);

    // Should contain only alphanumeric characters
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated ids should be different
    assert_ne!(id, generate_session_id());
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html("<a href=\"x\">Tom & Jerry's</a>"),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
    assert_eq!(escape_html("Beyoncé"), "Beyoncé");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(185_000), "3:05");
    assert_eq!(format_duration(3_601_999), "60:01");
}

#[test]
fn test_normalize_query() {
    assert_eq!(normalize_query(Some("  daft punk ")), Some("daft punk"));
    assert_eq!(normalize_query(Some("   ")), None);
    assert_eq!(normalize_query(Some("")), None);
    assert_eq!(normalize_query(None), None);
}

#[test]
fn test_has_query_key() {
    assert!(has_query_key("code=abc&state=xyz", "code"));
    assert!(has_query_key("state=xyz&code", "code"));
    assert!(has_query_key("code=a&code=b", "code"));
    assert!(!has_query_key("error_code=1&codes=2", "code"));
    assert!(!has_query_key("", "code"));
}

#[test]
fn test_token_expiry_uses_buffer() {
    let token = Token {
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
        scope: String::new(),
        expires_at: 10_000,
    };

    assert!(!token.is_expired_at(10_000 - TOKEN_EXPIRY_BUFFER_SECS - 1));
    assert!(token.is_expired_at(10_000 - TOKEN_EXPIRY_BUFFER_SECS));
    assert!(token.is_expired_at(20_000));
}

#[test]
fn test_token_response_keeps_previous_refresh_token() {
    let json = r#"{"access_token":"new","token_type":"Bearer","expires_in":3600}"#;
    let response: TokenResponse = serde_json::from_str(json).unwrap();
    let token = response.into_token(1_000, Some("old-refresh"));

    assert_eq!(token.access_token, "new");
    assert_eq!(token.refresh_token, "old-refresh");
    assert_eq!(token.expires_at, 4_600);

    let json = r#"{"access_token":"a","refresh_token":"rotated","scope":"user-top-read","expires_in":60}"#;
    let response: TokenResponse = serde_json::from_str(json).unwrap();
    let token = response.into_token(0, Some("old-refresh"));
    assert_eq!(token.refresh_token, "rotated");
    assert_eq!(token.scope, "user-top-read");
}

#[test]
fn test_playback_state_deserializes_spotify_payload() {
    let json = r#"{
        "timestamp": 1700000000000,
        "progress_ms": 42000,
        "is_playing": true,
        "device": {"id": "d1", "name": "Phone", "type": "Smartphone", "is_active": true, "volume_percent": 80},
        "item": {
            "id": "t1",
            "name": "Harder, Better, Faster, Stronger",
            "duration_ms": 224000,
            "uri": "spotify:track:t1",
            "artists": [{"id": "a1", "name": "Daft Punk"}, {"id": "a2", "name": "Someone"}],
            "album": {"id": "al1", "name": "Discovery", "release_date": "2001-03-12"}
        }
    }"#;
    let state: PlaybackState = serde_json::from_str(json).unwrap();

    assert!(state.is_playing);
    let item = state.item.unwrap();
    assert_eq!(item.primary_artist(), "Daft Punk");
    assert_eq!(item.album.unwrap().name, "Discovery");
    assert_eq!(state.device.unwrap().kind, "Smartphone");
}

#[test]
fn test_playback_state_without_item() {
    let state: PlaybackState = serde_json::from_str(r#"{"is_playing": false, "item": null}"#).unwrap();
    assert!(!state.is_playing);
    assert!(state.item.is_none());
}

#[test]
fn test_track_without_artists() {
    let track: Track = serde_json::from_str(r#"{"name": "Episode 12"}"#).unwrap();
    assert_eq!(track.primary_artist(), "Unknown artist");
}

#[test]
fn test_user_profile_premium() {
    let premium: UserProfile =
        serde_json::from_str(r#"{"id": "u1", "product": "premium"}"#).unwrap();
    let free: UserProfile =
        serde_json::from_str(r#"{"id": "u2", "display_name": "Ana", "product": "free"}"#).unwrap();
    let unknown: UserProfile = serde_json::from_str(r#"{"id": "u3"}"#).unwrap();

    assert!(premium.is_premium());
    assert!(!free.is_premium());
    assert!(!unknown.is_premium());
    assert_eq!(premium.name(), "u1");
    assert_eq!(free.name(), "Ana");
}

#[test]
fn test_playlist_page_deserializes() {
    let json = r#"{"items": [{"id": "p1", "name": "Chill", "tracks": {"href": "x", "total": 42}}], "total": 1, "next": null}"#;
    let page: Page<Playlist> = serde_json::from_str(json).unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].track_count(), 42);
    assert_eq!(page.total, Some(1));
}

#[test]
fn test_control_response_serialization() {
    assert_eq!(
        serde_json::to_string(&ControlResponse::ok()).unwrap(),
        r#"{"success":true}"#
    );
    assert_eq!(
        serde_json::to_string(&ControlResponse::failed("nope")).unwrap(),
        r#"{"success":false,"error":"nope"}"#
    );
}

#[test]
fn test_time_range_params() {
    assert_eq!(TimeRange::ShortTerm.as_str(), "short_term");
    assert_eq!(TimeRange::MediumTerm.as_str(), "medium_term");
    assert_eq!(TimeRange::LongTerm.as_str(), "long_term");
}
