use axum::response::Json;

use crate::{
    error::ApiResult,
    session::{Authenticated, LoginRequired},
    spotify::AuthenticatedClient,
    types::ControlResponse,
    warning,
};

pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const PREMIUM_REQUIRED: &str = "Spotify Premium required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Toggle,
    Next,
    Previous,
}

impl Control {
    async fn send(self, client: &AuthenticatedClient) -> ApiResult<()> {
        match self {
            // Read-then-act: another device may change state in between. The
            // next toggle corrects it.
            Control::Toggle => match client.current_playback().await? {
                Some(playback) if playback.is_playing => client.pause().await,
                _ => client.resume().await,
            },
            Control::Next => client.next_track().await,
            Control::Previous => client.previous_track().await,
        }
    }
}

/// Shared gate for the control endpoints: session, then premium, then the
/// command. Every outcome is a normal JSON response.
async fn run(auth: Result<Authenticated, LoginRequired>, control: Control) -> Json<ControlResponse> {
    let Ok(Authenticated(client)) = auth else {
        return Json(ControlResponse::failed(NOT_AUTHENTICATED));
    };

    if !client.is_premium().await {
        return Json(ControlResponse::failed(PREMIUM_REQUIRED));
    }

    match control.send(&client).await {
        Ok(()) => Json(ControlResponse::ok()),
        Err(e) => {
            warning!("Playback command {:?} failed: {}", control, e);
            Json(ControlResponse::failed(e.to_string()))
        }
    }
}

pub async fn toggle_playback(auth: Result<Authenticated, LoginRequired>) -> Json<ControlResponse> {
    run(auth, Control::Toggle).await
}

pub async fn next_track(auth: Result<Authenticated, LoginRequired>) -> Json<ControlResponse> {
    run(auth, Control::Next).await
}

pub async fn previous_track(auth: Result<Authenticated, LoginRequired>) -> Json<ControlResponse> {
    run(auth, Control::Previous).await
}
