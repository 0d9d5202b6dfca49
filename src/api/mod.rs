//! # API Module
//!
//! HTTP handlers for the dashboard. Each one is a thin pass-through: pull the
//! session's client, make one or more Spotify calls, hand the result to
//! [`crate::render`] (pages) or serialize a [`ControlResponse`] (controls).
//!
//! ## Endpoints
//!
//! - [`home`], [`login`], [`callback`], [`logout`] - landing page and the
//!   OAuth 2.0 authorization-code flow
//! - [`dashboard`], [`search`], [`stats`], [`top_tracks`], [`top_artists`],
//!   [`recent`] - session-gated pages
//! - [`toggle_playback`], [`next_track`], [`previous_track`] - premium-gated
//!   JSON controls
//! - [`health`] - liveness and version
//!
//! ## Failure handling
//!
//! Pages redirect to `/login` without a session and render a plain error
//! message (HTTP 200) when Spotify fails. Controls always answer HTTP 200 with
//! `{success, error?}`. Nothing is retried.
//!
//! [`ControlResponse`]: crate::types::ControlResponse

mod auth;
mod health;
mod pages;
mod playback;

pub use auth::{CallbackOutcome, CallbackParams, callback, home, login, logout};
pub use health::health;
pub use pages::{dashboard, recent, search, stats, top_artists, top_tracks};
pub use playback::{next_track, previous_track, toggle_playback};

use axum::response::{IntoResponse, Response};

use crate::{error::ApiError, render, warning};

/// A failed remote call on a page handler. Rendered as an error page.
pub struct PageError(ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        warning!("Spotify request failed ({}): {}", self.0.kind(), self.0);
        render::error_page(&self.0.to_string()).into_response()
    }
}
