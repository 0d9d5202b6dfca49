use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{SignedCookieJar, cookie::Key};

use crate::{server::AppState, spotify::AuthenticatedClient};

/// Client for the signed-in user, extracted from the session cookie.
///
/// Rejects with a redirect to `/login`. Handlers that must answer differently
/// (the JSON playback controls) take `Result<Authenticated, LoginRequired>`.
///
/// # Example
///
/// ```rust,ignore
/// async fn recent(Authenticated(client): Authenticated) -> impl IntoResponse {
///     client.recently_played(30).await
/// }
/// ```
pub struct Authenticated(pub AuthenticatedClient);

/// No token stored for this session.
#[derive(Debug)]
pub struct LoginRequired;

impl IntoResponse for LoginRequired {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = LoginRequired;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar<Key> = SignedCookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| LoginRequired)?;

        super::get_client(state, &jar)
            .await
            .map(Authenticated)
            .ok_or(LoginRequired)
    }
}
