//! HTML rendering.
//!
//! Plain string building; every value that comes from Spotify or the request
//! goes through [`escape_html`].

use axum::response::Html;

use crate::{
    types::{Artist, Device, PlayHistory, PlaybackState, Playlist, TimeRange, Track, UserProfile},
    utils::{escape_html, format_duration},
};

const STYLE: &str = "body{font-family:sans-serif;max-width:860px;margin:2em auto;padding:0 1em}\
    nav a{margin-right:1em}.error{color:#b00020}.muted{color:#666}";

pub struct DashboardView {
    pub profile: UserProfile,
    pub current: Option<PlaybackState>,
    pub playlists: Vec<Playlist>,
    pub devices: Vec<Device>,
    pub premium: bool,
}

pub struct RangeStats {
    pub range: TimeRange,
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Spotify Dashboard</title>\
         <style>{STYLE}</style></head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    ))
}

fn nav() -> &'static str {
    "<nav><a href=\"/dashboard\">Dashboard</a><a href=\"/search\">Search</a>\
     <a href=\"/stats\">Stats</a><a href=\"/top-tracks\">Top tracks</a>\
     <a href=\"/top-artists\">Top artists</a><a href=\"/recent\">Recent</a>\
     <a href=\"/logout\">Log out</a></nav>"
}

fn track_line(track: &Track) -> String {
    format!(
        "<li class=\"track\">{} - {} <span class=\"muted\">{}</span></li>",
        escape_html(&track.name),
        escape_html(track.primary_artist()),
        format_duration(track.duration_ms),
    )
}

fn track_list(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return "<p class=\"muted\">Nothing here yet.</p>".to_string();
    }
    let items: String = tracks.iter().map(track_line).collect();
    format!("<ol>{items}</ol>")
}

fn artist_list(artists: &[Artist]) -> String {
    if artists.is_empty() {
        return "<p class=\"muted\">Nothing here yet.</p>".to_string();
    }
    let items: String = artists
        .iter()
        .map(|a| {
            let genres = if a.genres.is_empty() {
                String::new()
            } else {
                format!(" <span class=\"muted\">{}</span>", escape_html(&a.genres.join(", ")))
            };
            format!("<li class=\"artist\">{}{}</li>", escape_html(&a.name), genres)
        })
        .collect();
    format!("<ol>{items}</ol>")
}

pub fn home(signed_in: bool) -> Html<String> {
    let action = if signed_in {
        "<a href=\"/dashboard\">Open your dashboard</a>"
    } else {
        "<a href=\"/login\">Log in with Spotify</a>"
    };
    layout(
        "Home",
        &format!("<h1>Spotify Dashboard</h1>\n<p>{action}</p>"),
    )
}

pub fn error_page(message: &str) -> Html<String> {
    layout(
        "Error",
        &format!(
            "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Home</a></p>",
            escape_html(message)
        ),
    )
}

pub fn dashboard(view: &DashboardView) -> Html<String> {
    let now_playing = match view.current.as_ref().and_then(|c| c.item.as_ref()) {
        Some(track) => format!(
            "<p id=\"now-playing\">{} - {}{}</p>",
            escape_html(&track.name),
            escape_html(track.primary_artist()),
            match view.current.as_ref().map(|c| c.is_playing) {
                Some(false) => " <span class=\"muted\">(paused)</span>",
                _ => "",
            },
        ),
        None => "<p id=\"now-playing\" class=\"muted\">Nothing playing</p>".to_string(),
    };

    let controls = if view.premium {
        "<div id=\"controls\">\
         <button onclick=\"control('previous-track')\">Previous</button>\
         <button onclick=\"control('toggle-playback')\">Play/Pause</button>\
         <button onclick=\"control('next-track')\">Next</button>\
         <span id=\"control-status\" class=\"muted\"></span></div>\n\
         <script>async function control(a){const r=await fetch('/api/'+a,{method:'POST'});\
         const j=await r.json();document.getElementById('control-status').textContent=\
         j.success?'':(j.error||'failed');if(j.success){setTimeout(()=>location.reload(),500);}}</script>"
            .to_string()
    } else {
        "<p class=\"muted\">Playback controls require Spotify Premium.</p>".to_string()
    };

    let playlists: String = view
        .playlists
        .iter()
        .map(|p| {
            format!(
                "<li class=\"playlist\">{} ({} tracks)</li>",
                escape_html(&p.name),
                p.track_count()
            )
        })
        .collect();

    let devices: String = if view.devices.is_empty() {
        "<p class=\"muted\">No devices available</p>".to_string()
    } else {
        let items: String = view
            .devices
            .iter()
            .map(|d| {
                format!(
                    "<li class=\"device\">{} <span class=\"muted\">{}{}</span></li>",
                    escape_html(&d.name),
                    escape_html(&d.kind),
                    if d.is_active { ", active" } else { "" },
                )
            })
            .collect();
        format!("<ul>{items}</ul>")
    };

    let body = format!(
        "{nav}\n<h1>Hello, {name}</h1>\n<p class=\"muted\">Account: {product}</p>\n\
         <h2>Now playing</h2>\n{now_playing}\n{controls}\n\
         <h2>Devices</h2>\n{devices}\n\
         <h2>Your playlists</h2>\n<ul>{playlists}</ul>",
        nav = nav(),
        name = escape_html(view.profile.name()),
        product = if view.premium { "Premium" } else { "Free" },
    );
    layout("Dashboard", &body)
}

pub fn search(query: &str, results: &[Track]) -> Html<String> {
    let results_html = if query.is_empty() {
        String::new()
    } else {
        format!(
            "<h2>Results for \"{}\"</h2>\n{}",
            escape_html(query),
            track_list(results)
        )
    };

    let body = format!(
        "{nav}\n<h1>Search tracks</h1>\n\
         <form method=\"GET\" action=\"/search\"><input type=\"text\" name=\"q\" value=\"{q}\" \
         placeholder=\"Track name...\"><button type=\"submit\">Search</button></form>\n{results_html}",
        nav = nav(),
        q = escape_html(query),
    );
    layout("Search", &body)
}

pub fn stats(ranges: &[RangeStats]) -> Html<String> {
    let sections: String = ranges
        .iter()
        .map(|r| {
            format!(
                "<section><h2>{label}</h2>\n<h3>Top tracks</h3>\n{tracks}\n<h3>Top artists</h3>\n{artists}</section>\n",
                label = r.range.label(),
                tracks = track_list(&r.tracks),
                artists = artist_list(&r.artists),
            )
        })
        .collect();
    layout(
        "Stats",
        &format!("{}\n<h1>Your listening stats</h1>\n{}", nav(), sections),
    )
}

pub fn top_tracks(tracks: &[Track]) -> Html<String> {
    layout(
        "Top tracks",
        &format!(
            "{}\n<h1>Top tracks</h1>\n<p class=\"muted\">{}</p>\n{}",
            nav(),
            TimeRange::MediumTerm.label(),
            track_list(tracks)
        ),
    )
}

pub fn top_artists(artists: &[Artist]) -> Html<String> {
    layout(
        "Top artists",
        &format!(
            "{}\n<h1>Top artists</h1>\n<p class=\"muted\">{}</p>\n{}",
            nav(),
            TimeRange::MediumTerm.label(),
            artist_list(artists)
        ),
    )
}

pub fn recent(history: &[PlayHistory]) -> Html<String> {
    let body = if history.is_empty() {
        "<p class=\"muted\">Nothing played recently.</p>".to_string()
    } else {
        let items: String = history
            .iter()
            .map(|h| {
                format!(
                    "<li class=\"track\">{} - {} <span class=\"muted\">{}</span></li>",
                    escape_html(&h.track.name),
                    escape_html(h.track.primary_artist()),
                    escape_html(&h.played_at),
                )
            })
            .collect();
        format!("<ol>{items}</ol>")
    };
    layout(
        "Recently played",
        &format!("{}\n<h1>Recently played</h1>\n{}", nav(), body),
    )
}
