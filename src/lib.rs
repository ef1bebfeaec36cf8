//! Location Sharing Server Library
//!
//! This library provides a small HTTP backend that stores location samples
//! of users in memory and serves them to callers authenticated through
//! Firebase Authentication.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for health and location endpoints
//! - `config` - Configuration management and environment variables
//! - `error` - HTTP error type and panic recovery
//! - `extractors` - Request body extraction
//! - `identity` - Token verification against the identity provider, custom
//!   token minting
//! - `management` - The in-memory location store
//! - `middleware` - Bearer token authentication for protected routes
//! - `server` - Router assembly and the HTTP listener
//! - `state` - Shared application state
//! - `types` - Data structures and wire types
//! - `utils` - Token parsing and phone number helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use locshare::{
//!     config,
//!     identity::{FirebaseClient, FirebaseVerifier, ServiceAccount},
//!     management::LocationStore,
//!     server,
//!     state::AppState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> locshare::Res<()> {
//!     config::load_env().await?;
//!
//!     let account = ServiceAccount::load(&config::credentials_path()).await?;
//!     let api_key = config::firebase_api_key().ok_or("FIREBASE_API_KEY is not set")?;
//!     let client = FirebaseClient::new(
//!         config::identity_api_url(),
//!         api_key,
//!         config::identity_timeout(),
//!     )?;
//!     let verifier = FirebaseVerifier::new(client, account.project_id.as_str());
//!
//!     let state = AppState::new(
//!         Arc::new(LocationStore::seeded()),
//!         Arc::new(verifier),
//!         config::list_scope()?,
//!     );
//!     server::start_api_server(state, &config::server_addr()).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod identity;
pub mod management;
pub mod middleware;
pub mod server;
pub mod state;
pub mod types;
pub mod utils;

/// Result alias for top-level plumbing (startup, CLI commands).
///
/// Module-level code returns typed errors; they all convert into this boxed
/// error through `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an operator-facing status line with a blue `o` marker.
///
/// Console lines complement the `tracing` output: they announce what the
/// process is doing at startup and shutdown, independent of `RUST_LOG`.
///
/// # Example
///
/// ```
/// info!("Loading credentials from {}", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green `✓` marker.
///
/// # Example
///
/// ```
/// success!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with code 1.
///
/// Reserved for startup failures the server cannot run without: missing
/// credentials, an unusable listen address, a failed bind. The macro
/// evaluates to `!`, so it can end a `match` arm.
///
/// # Example
///
/// ```
/// let listener = match TcpListener::bind(&addr).await {
///     Ok(listener) => listener,
///     Err(e) => error!("Failed to bind {}: {}", addr, e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr without exiting.
///
/// # Example
///
/// ```
/// warning!("Cannot load environment: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
