use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, Key, SameSite},
};
use sha2::{Digest, Sha512};

pub const SESSION_COOKIE_NAME: &str = "spotdash_session";

/// Derives the cookie signing key from the configured secret.
///
/// `Key` wants 64 bytes of material, which is exactly one SHA-512 digest.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(&digest[..])
}

/// Browser-session cookie carrying the session id.
pub fn session_cookie(session_id: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Removal cookie for the session.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build()
}

/// Session id from a verified cookie. Tampered cookies read as absent.
pub fn session_id(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|id| !id.is_empty())
}
