use axum::{extract::Query, response::Html};
use serde::Deserialize;

use super::PageError;
use crate::{
    render::{self, DashboardView, RangeStats},
    session::Authenticated,
    types::TimeRange,
    utils,
};

pub const DASHBOARD_PLAYLIST_LIMIT: u32 = 10;
pub const SEARCH_LIMIT: u32 = 10;
pub const STATS_LIMIT: u32 = 10;
pub const TOP_ARTISTS_LIMIT: u32 = 20;
pub const TOP_TRACKS_LIMIT: u32 = 25;
pub const RECENT_LIMIT: u32 = 30;

pub const STATS_RANGES: [TimeRange; 2] = [TimeRange::ShortTerm, TimeRange::MediumTerm];

type PageResult = Result<Html<String>, PageError>;

pub async fn dashboard(Authenticated(client): Authenticated) -> PageResult {
    let (profile, current, playlists, devices) = tokio::try_join!(
        client.current_user(),
        client.currently_playing(),
        client.playlists(DASHBOARD_PLAYLIST_LIMIT),
        client.devices(),
    )?;

    let premium = profile.is_premium();
    Ok(render::dashboard(&DashboardView {
        profile,
        current,
        playlists: playlists.items,
        devices,
        premium,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search(
    Authenticated(client): Authenticated,
    Query(params): Query<SearchParams>,
) -> PageResult {
    let Some(query) = utils::normalize_query(params.q.as_deref()) else {
        return Ok(render::search("", &[]));
    };

    let tracks = client.search_tracks(query, SEARCH_LIMIT).await?;
    Ok(render::search(query, &tracks))
}

pub async fn stats(Authenticated(client): Authenticated) -> PageResult {
    let mut ranges = Vec::with_capacity(STATS_RANGES.len());
    for range in STATS_RANGES {
        let (tracks, artists) = tokio::try_join!(
            client.top_tracks(range, STATS_LIMIT),
            client.top_artists(range, STATS_LIMIT),
        )?;
        ranges.push(RangeStats {
            range,
            tracks,
            artists,
        });
    }

    Ok(render::stats(&ranges))
}

pub async fn top_artists(Authenticated(client): Authenticated) -> PageResult {
    let artists = client
        .top_artists(TimeRange::MediumTerm, TOP_ARTISTS_LIMIT)
        .await?;
    Ok(render::top_artists(&artists))
}

pub async fn top_tracks(Authenticated(client): Authenticated) -> PageResult {
    let tracks = client
        .top_tracks(TimeRange::MediumTerm, TOP_TRACKS_LIMIT)
        .await?;
    Ok(render::top_tracks(&tracks))
}

pub async fn recent(Authenticated(client): Authenticated) -> PageResult {
    let history = client.recently_played(RECENT_LIMIT).await?;
    Ok(render::recent(&history))
}
