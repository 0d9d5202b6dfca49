//! Spotify Listening Dashboard Library
//!
//! This library provides a small web application that signs a user in to
//! Spotify with the OAuth 2.0 authorization-code flow, renders their listening
//! data and forwards a handful of playback-control commands to the Web API.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers (pages, OAuth, playback controls)
//! - `config` - Configuration loaded once from the environment
//! - `error` - Error types for remote calls and configuration
//! - `render` - HTML rendering of handler results
//! - `server` - Router construction and the HTTP server
//! - `session` - Session store and per-request token lookup
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotdash::{config::Config, server, session::MemorySessionStore, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotdash::Res<()> {
//!     let config = Arc::new(Config::from_env()?);
//!     let spotify = Arc::new(SpotifyClient::new(Arc::clone(&config))?);
//!     let state = server::AppState::new(config, spotify, Arc::new(MemorySessionStore::default()));
//!     server::start_api_server(state).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used for plumbing where the concrete error does not matter to the caller,
/// such as session store access and server start-up. Keeps Send + Sync bounds
/// so results can cross await points.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spotdash::Res;
///
/// async fn start() -> Res<()> {
///     Ok(())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Writes one line to stdout with a blue "o" indicator. Used for routine
/// events such as server start-up, sign-ins and token refreshes.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// info!("Session started ({} active)", active);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Writes one line to stdout with a green "✓" indicator once an operation
/// has completed, for example a finished OAuth callback.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("User authenticated");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal start-up failures. Request handlers must never call this;
/// they turn failures into responses instead.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// Exits with code 1 right after printing, so the macro can stand in for any
/// expression type (for example a `match` arm that must yield a `Config`).
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as failed remote calls or a failed token
/// refresh. The program keeps running.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Token refresh failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
