//! # Session Module
//!
//! Ties a browser to a [`Token`] record. The browser holds a signed cookie with
//! a random session id; the record itself lives in a [`SessionStore`].
//!
//! A session is either empty (no cookie, a cookie that fails verification, or
//! an id the store does not know) or holds exactly one token. Handlers ask for
//! an [`AuthenticatedClient`] through [`get_client`] or the [`Authenticated`]
//! extractor and never see the cookie or the store directly.

mod cookies;
mod extractor;
mod store;

pub use cookies::{SESSION_COOKIE_NAME, signing_key};
pub use extractor::{Authenticated, LoginRequired};
pub use store::{MemorySessionStore, SESSION_IDLE_TIMEOUT, SessionStore};

use std::sync::Arc;

use axum_extra::extract::SignedCookieJar;

use crate::{
    Res, info, server::AppState, spotify::AuthenticatedClient, types::Token, utils, warning,
};

/// Looks up the session's token and binds a client to it.
///
/// Expired tokens are refreshed and written back. A failed refresh keeps the
/// stored token; the next remote call will surface the problem.
pub async fn get_client(state: &AppState, jar: &SignedCookieJar) -> Option<AuthenticatedClient> {
    let session_id = cookies::session_id(jar)?;

    let token = match state.sessions.get(&session_id).await {
        Ok(Some(token)) => token,
        Ok(None) => return None,
        Err(e) => {
            warning!("Session lookup failed: {}", e);
            return None;
        }
    };

    let token = if token.is_expired() {
        refresh(state, &session_id, token).await
    } else {
        token
    };

    Some(AuthenticatedClient::new(Arc::clone(&state.spotify), token))
}

async fn refresh(state: &AppState, session_id: &str, token: Token) -> Token {
    match state.spotify.refresh_token(&token.refresh_token).await {
        Ok(fresh) => {
            if let Err(e) = state.sessions.set(session_id, fresh.clone()).await {
                warning!("Failed to store refreshed token: {}", e);
            }
            info!("Refreshed access token for session");
            fresh
        }
        Err(e) => {
            warning!("Token refresh failed: {}", e);
            token
        }
    }
}

/// True when the request carries a session with a stored token. No remote
/// call is made.
pub async fn has_session(state: &AppState, jar: &SignedCookieJar) -> bool {
    match cookies::session_id(jar) {
        Some(id) => matches!(state.sessions.get(&id).await, Ok(Some(_))),
        None => false,
    }
}

/// Stores `token` under a new session id and sets the session cookie.
///
/// A session the browser already carried is dropped first, so signing in
/// again never leaves an unreachable record behind.
pub async fn start(state: &AppState, jar: SignedCookieJar, token: Token) -> Res<SignedCookieJar> {
    if let Some(previous) = cookies::session_id(&jar) {
        state.sessions.clear(&previous).await?;
    }

    let session_id = utils::generate_session_id();
    state.sessions.set(&session_id, token).await?;

    match state.sessions.count().await {
        Ok(active) => info!("Session started ({} active)", active),
        Err(e) => warning!("Session count unavailable: {}", e),
    }

    let cookie = cookies::session_cookie(&session_id, state.config.secure_cookies());
    Ok(jar.add(cookie))
}

/// Drops the stored token (if any) and removes the session cookie.
pub async fn end(state: &AppState, jar: SignedCookieJar) -> SignedCookieJar {
    if let Some(session_id) = cookies::session_id(&jar) {
        if let Err(e) = state.sessions.clear(&session_id).await {
            warning!("Session deletion failed during logout: {}", e);
        }
    }

    jar.remove(cookies::clear_session_cookie())
}
