use rand::{Rng, distr::Alphanumeric};

/// Length of a session id in characters.
pub const SESSION_ID_LEN: usize = 64;

/// Generates a random session id.
///
/// Creates a string of [`SESSION_ID_LEN`] alphanumeric characters from the
/// thread-local RNG. The id is the only thing the session cookie carries, so
/// it must not be guessable.
///
/// # Returns
///
/// A fresh id, different on every call.
///
/// # Example
///
/// ```
/// let id = generate_session_id();
/// assert_eq!(id.len(), SESSION_ID_LEN);
/// ```
pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Escapes text for use in HTML element content and quoted attributes.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their entities. Everything that
/// comes from Spotify or from the query string goes through here before it
/// is written into a page.
///
/// # Example
///
/// ```
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `m:ss` for a track length in milliseconds.
///
/// Minutes are not wrapped into hours, so an hour-long track reads `60:00`.
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Trims a search query; `None` when nothing is left to search for.
pub fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

/// Checks whether a raw query string carries `key`, with or without a value.
///
/// Only the key is inspected, so repeated or malformed values never make the
/// check fail.
///
/// # Example
///
/// ```
/// assert!(has_query_key("code=abc&state=xyz", "code"));
/// assert!(!has_query_key("error_code=1", "code"));
/// ```
pub fn has_query_key(query: &str, key: &str) -> bool {
    query
        .split('&')
        .any(|pair| pair.split('=').next() == Some(key))
}
