use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use super::{FirebaseClient, IdentityError, ServiceAccount};
use crate::utils;

/// Audience Firebase expects in custom tokens.
pub const CUSTOM_TOKEN_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";

/// Custom tokens are accepted for at most one hour after `iat`.
const CUSTOM_TOKEN_LIFETIME_SECS: i64 = 3600;
const MAX_UID_LEN: usize = 128;

#[derive(Debug, Serialize)]
struct CustomTokenClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'static str,
    iat: i64,
    exp: i64,
    uid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    claims: Option<PhoneClaims<'a>>,
}

/// Developer claims copied into the ID token of a phone sign-in.
#[derive(Debug, Serialize)]
struct PhoneClaims<'a> {
    phone_number: &'a str,
    phone_verified: bool,
}

/// Signs a Firebase custom token for `uid` with the service account key.
///
/// With `phone_number` set, the token carries `phone_number` and
/// `phone_verified` developer claims. The number must be E.164.
///
/// # Errors
///
/// [`IdentityError::InvalidUid`] for an empty or over-long uid,
/// [`IdentityError::InvalidPhoneNumber`] for a number that is not E.164,
/// [`IdentityError::MissingSigningKey`] when the key file lacks
/// `client_email` or `private_key`, and [`IdentityError::Signing`] when the
/// private key is not a usable RSA key.
pub fn mint_custom_token(
    account: &ServiceAccount,
    uid: &str,
    phone_number: Option<&str>,
) -> Result<String, IdentityError> {
    if uid.is_empty() || uid.chars().count() > MAX_UID_LEN {
        return Err(IdentityError::InvalidUid(format!(
            "'{uid}' must be between 1 and {MAX_UID_LEN} characters"
        )));
    }
    if let Some(phone) = phone_number {
        utils::validate_phone_number(phone).map_err(IdentityError::InvalidPhoneNumber)?;
    }
    if !account.can_sign() {
        return Err(IdentityError::MissingSigningKey);
    }

    let iat = Utc::now().timestamp();
    let claims = CustomTokenClaims {
        iss: &account.client_email,
        sub: &account.client_email,
        aud: CUSTOM_TOKEN_AUDIENCE,
        iat,
        exp: iat + CUSTOM_TOKEN_LIFETIME_SECS,
        uid,
        claims: phone_number.map(|phone_number| PhoneClaims {
            phone_number,
            phone_verified: true,
        }),
    };

    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())?;
    let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)?;

    tracing::debug!(uid, issuer = %account.client_email, "minted custom token");
    Ok(token)
}

/// Mints a custom token for `uid` and exchanges it for an ID token.
///
/// This is what `locshare token --uid` runs; the returned ID token is
/// accepted by the protected endpoints of a server configured for the same
/// project.
///
/// # Example
///
/// ```rust,ignore
/// let account = ServiceAccount::load(&config::credentials_path()).await?;
/// let id_token = issue_id_token(&client, &account, "test-user", Some("+14155552671")).await?;
/// ```
pub async fn issue_id_token(
    client: &FirebaseClient,
    account: &ServiceAccount,
    uid: &str,
    phone_number: Option<&str>,
) -> Result<String, IdentityError> {
    let custom_token = mint_custom_token(account, uid, phone_number)?;
    client.exchange_custom_token(&custom_token).await
}
