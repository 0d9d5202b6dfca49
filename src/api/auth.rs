use axum::{
    extract::{Query, RawQuery, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::{
    error::ApiError, info, render, server::AppState, session, spotify::SpotifyApi, success,
    types::Token, utils, warning,
};

/// Query parameters Spotify appends when it redirects back to `/callback`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Where a callback request ends up.
#[derive(Debug)]
pub enum CallbackOutcome {
    /// The code was exchanged; the token starts a session.
    Authenticated(Token),
    /// Spotify reported an error (usually the user declined). Carries the
    /// error and its description, if any.
    Denied(String),
    /// The token endpoint rejected the code.
    ExchangeFailed(ApiError),
    /// Neither a code nor an error.
    Malformed,
}

impl CallbackOutcome {
    /// Runs the callback state machine. Only a `code` reaches Spotify.
    pub async fn resolve(params: &CallbackParams, api: &dyn SpotifyApi) -> Self {
        if let Some(error) = params.error.as_deref() {
            let message = match params.error_description.as_deref() {
                Some(desc) => format!("{}: {}", error, desc),
                None => error.to_string(),
            };
            return CallbackOutcome::Denied(message);
        }

        match params.code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => match api.exchange_code(code).await {
                Ok(token) => CallbackOutcome::Authenticated(token),
                Err(e) => CallbackOutcome::ExchangeFailed(e),
            },
            None => CallbackOutcome::Malformed,
        }
    }
}

/// Landing page. A `code` in the query means the provider was pointed at `/`
/// instead of `/callback`, so the whole query is forwarded there untouched.
pub async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    RawQuery(raw): RawQuery,
) -> Response {
    if let Some(q) = raw.filter(|q| utils::has_query_key(q, "code")) {
        return Redirect::to(&format!("/callback?{}", q)).into_response();
    }

    render::home(session::has_session(&state, &jar).await).into_response()
}

pub async fn login(State(state): State<AppState>) -> Redirect {
    Redirect::to(state.config.authorize_url())
}

pub async fn callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(SignedCookieJar, Redirect), Html<String>> {
    match CallbackOutcome::resolve(&params, state.spotify.as_ref()).await {
        CallbackOutcome::Authenticated(token) => {
            let jar = session::start(&state, jar, token).await.map_err(|e| {
                warning!("Session creation failed: {}", e);
                render::error_page(&format!("Could not start session: {}", e))
            })?;
            success!("User authenticated");
            Ok((jar, Redirect::to("/dashboard")))
        }
        CallbackOutcome::Denied(message) => {
            info!("Authorization denied by Spotify: {}", message);
            Err(render::error_page(&format!(
                "Authorization failed: {}",
                message
            )))
        }
        CallbackOutcome::ExchangeFailed(e) => {
            warning!("Token exchange failed: {}", e);
            Err(render::error_page(&format!("Login failed: {}", e)))
        }
        CallbackOutcome::Malformed => Err(render::error_page(
            "Login failed: the callback carried neither a code nor an error.",
        )),
    }
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (session::end(&state, jar).await, Redirect::to("/"))
}
