use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// A single reported position of a user.
///
/// Missing or `null` fields fall back to their zero values and unknown
/// fields are ignored, so clients sending partial payloads still produce a
/// record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl LocationRecord {
    pub fn new(user_id: &str, latitude: f64, longitude: f64, timestamp: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            latitude,
            longitude,
            timestamp: timestamp.to_string(),
        }
    }
}

/// Which records `GET /api/sharedlocations/{user_id}` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    /// Every stored record, regardless of the requested user.
    #[default]
    All,
    /// Only the records of the requested user.
    Subject,
}

impl FromStr for ListScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ListScope::All),
            "subject" => Ok(ListScope::Subject),
            other => Err(format!(
                "unknown list scope '{other}', expected 'all' or 'subject'"
            )),
        }
    }
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListScope::All => write!(f, "all"),
            ListScope::Subject => write!(f, "subject"),
        }
    }
}

/// Claims carried in the payload segment of a Firebase ID token.
///
/// Only the claims checked locally are read; everything else is the
/// provider's business.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub aud: String,
    /// `https://securetoken.google.com/<project_id>` for tokens minted by
    /// Firebase Authentication.
    #[serde(default)]
    pub iss: String,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: i64,
}

/// Body of `POST accounts:lookup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest<'a> {
    pub id_token: &'a str,
}

/// Answer to `accounts:lookup`: the accounts the ID token resolves to.
///
/// A valid token yields exactly one entry. The provider omits `users`
/// entirely when nothing matches, hence the default.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub users: Vec<ProviderUser>,
}

/// One account record from `accounts:lookup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUser {
    /// The account's uid, which is the subject the server works with.
    pub local_id: String,
    pub phone_number: Option<String>,
}

/// Body of `POST accounts:signInWithCustomToken`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTokenRequest<'a> {
    pub token: &'a str,
    /// Must be `true`, otherwise the provider answers without an `idToken`.
    pub return_secure_token: bool,
}

/// Answer to `accounts:signInWithCustomToken`.
///
/// Only the ID token is kept; the refresh token is of no use to a one-shot
/// command line exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTokenResponse {
    #[serde(default)]
    pub id_token: String,
}

/// Error envelope returned by the Identity Toolkit API.
///
/// ```text
/// {"error": {"code": 400, "message": "INVALID_ID_TOKEN", ...}}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorResponse {
    pub error: ProviderError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderError {
    /// Machine-readable reason such as `INVALID_CUSTOM_TOKEN`.
    #[serde(default)]
    pub message: String,
}
