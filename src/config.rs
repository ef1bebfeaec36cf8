//! Configuration management for the locshare server.
//!
//! Values are read from environment variables. Before anything else runs,
//! [`load_env`] pre-populates the environment from `.env` files so operators
//! can keep credentials out of their shell profile:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/locshare/.env`)
//! 4. Application defaults
//!
//! `dotenv` never overrides a variable that is already set, which is what
//! gives the order above.

use std::{env, path::PathBuf, time::Duration};

use crate::types::ListScope;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_CREDENTIALS_PATH: &str = "config/serviceAccountKey.json";
const DEFAULT_IDENTITY_API_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Loads `.env` files into the process environment.
///
/// Missing files are skipped. A file that exists but cannot be parsed is
/// reported as an error.
///
/// # Directory Structure
///
/// Besides the working directory, the function looks in:
/// - Linux: `~/.local/share/locshare/.env`
/// - macOS: `~/Library/Application Support/locshare/.env`
/// - Windows: `%LOCALAPPDATA%/locshare/.env`
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(format!("cannot read .env in working directory: {e}"));
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("locshare/.env");
    if async_fs::metadata(&path).await.is_ok() {
        dotenv::from_path(&path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    }

    Ok(())
}

/// Returns the address the HTTP listener binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `0.0.0.0:8080`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the path of the Firebase service account key.
///
/// Reads `GOOGLE_APPLICATION_CREDENTIALS`, defaulting to
/// `config/serviceAccountKey.json` relative to the working directory.
pub fn credentials_path() -> PathBuf {
    env::var("GOOGLE_APPLICATION_CREDENTIALS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH))
}

/// Returns the Firebase Web API key, if configured.
///
/// The key is required both for token lookup and for exchanging custom
/// tokens, so callers treat `None` as a startup error.
pub fn firebase_api_key() -> Option<String> {
    env::var("FIREBASE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Returns the base URL of the Firebase Identity Toolkit REST API.
///
/// Reads `FIREBASE_AUTH_URL`, defaulting to
/// `https://identitytoolkit.googleapis.com/v1`. Pointing it elsewhere is
/// mostly useful for the Firebase Auth emulator
/// (`http://localhost:9099/identitytoolkit.googleapis.com/v1`).
///
/// # Example
///
/// ```
/// let client = FirebaseClient::new(config::identity_api_url(), api_key, config::identity_timeout())?;
/// ```
pub fn identity_api_url() -> String {
    env::var("FIREBASE_AUTH_URL").unwrap_or_else(|_| DEFAULT_IDENTITY_API_URL.to_string())
}

/// Returns the timeout applied to every identity provider request.
///
/// Reads `FIREBASE_TIMEOUT_SECS` as whole seconds. Unset or unparsable
/// values fall back to 10 seconds; a request that times out fails token
/// verification with 401.
pub fn identity_timeout() -> Duration {
    let secs = env::var("FIREBASE_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Returns how the shared-locations endpoint scopes its results.
///
/// Reads `LOCSHARE_LIST_SCOPE` (`all` or `subject`). Unset means `all`.
pub fn list_scope() -> Result<ListScope, String> {
    match env::var("LOCSHARE_LIST_SCOPE") {
        Ok(value) => value.parse(),
        Err(_) => Ok(ListScope::default()),
    }
}
