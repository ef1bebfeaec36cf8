use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Response};

use super::{IdentityError, IdentityVerifier, VerifyError, VerifyFuture};
use crate::{
    types::{
        CustomTokenRequest, CustomTokenResponse, LookupRequest, LookupResponse,
        ProviderErrorResponse,
    },
    utils,
};

/// Typed client for the Firebase Identity Toolkit REST API.
#[derive(Debug, Clone)]
pub struct FirebaseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FirebaseClient {
    /// Builds a client for `base_url` (e.g. `https://identitytoolkit.googleapis.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MissingApiKey`] for an empty key and
    /// [`IdentityError::Client`] when the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(IdentityError::MissingApiKey);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IdentityError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Asks the provider which account an ID token belongs to.
    ///
    /// The provider checks signature, expiry and revocation. A token it does
    /// not accept comes back as [`VerifyError::Rejected`] carrying the
    /// provider's message (e.g. `INVALID_ID_TOKEN`).
    pub async fn lookup(&self, id_token: &str) -> Result<LookupResponse, VerifyError> {
        let res = self
            .http
            .post(self.endpoint("lookup"))
            .query(&[("key", &self.api_key)])
            .json(&LookupRequest { id_token })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(VerifyError::Rejected(provider_message(res).await));
        }

        Ok(res.json::<LookupResponse>().await?)
    }

    /// Exchanges a custom token for an ID token.
    ///
    /// Used to obtain a credential for exercising the protected endpoints by
    /// hand; the server itself only ever consumes ID tokens.
    ///
    /// # Example
    ///
    /// ```
    /// let id_token = client.exchange_custom_token("eyJhbGciOi...").await?;
    /// ```
    pub async fn exchange_custom_token(&self, custom_token: &str) -> Result<String, IdentityError> {
        let res = self
            .http
            .post(self.endpoint("signInWithCustomToken"))
            .query(&[("key", &self.api_key)])
            .json(&CustomTokenRequest {
                token: custom_token,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(IdentityError::Provider(provider_message(res).await));
        }

        let body: CustomTokenResponse = res.json().await?;
        if body.id_token.is_empty() {
            return Err(IdentityError::Provider(
                "no ID token in response".to_string(),
            ));
        }

        Ok(body.id_token)
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.base_url)
    }
}

async fn provider_message(res: Response) -> String {
    let status = res.status();
    match res.json::<ProviderErrorResponse>().await {
        Ok(body) if !body.error.message.is_empty() => body.error.message,
        _ => format!("provider responded with {status}"),
    }
}

const SECURE_TOKEN_ISSUER: &str = "https://securetoken.google.com";

/// [`IdentityVerifier`] backed by Firebase Authentication.
#[derive(Debug, Clone)]
pub struct FirebaseVerifier {
    client: FirebaseClient,
    project_id: String,
}

impl FirebaseVerifier {
    pub fn new(client: FirebaseClient, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
        }
    }

    fn expected_issuer(&self) -> String {
        format!("{SECURE_TOKEN_ISSUER}/{}", self.project_id)
    }

    async fn verify_token(&self, token: &str) -> Result<String, VerifyError> {
        let claims = utils::decode_token_claims(token).map_err(VerifyError::Malformed)?;

        // aud, exp and iss are checked before the provider is contacted.
        if claims.aud != self.project_id {
            return Err(VerifyError::Rejected(format!(
                "token audience '{}' does not match project '{}'",
                claims.aud, self.project_id
            )));
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(VerifyError::Rejected("token has expired".to_string()));
        }
        let issuer = self.expected_issuer();
        if claims.iss != issuer {
            return Err(VerifyError::Rejected(format!(
                "token issuer '{}' is not '{issuer}'",
                claims.iss
            )));
        }

        let lookup = self.client.lookup(token).await?;
        let Some(user) = lookup.users.into_iter().next() else {
            return Err(VerifyError::Rejected(
                "no account found for token".to_string(),
            ));
        };

        if user.local_id != claims.sub {
            return Err(VerifyError::Rejected(
                "token subject does not match account".to_string(),
            ));
        }

        tracing::debug!(
            subject = %user.local_id,
            phone = user.phone_number.as_deref().unwrap_or("-"),
            "token verified"
        );
        Ok(user.local_id)
    }
}

impl IdentityVerifier for FirebaseVerifier {
    fn verify<'a>(&'a self, token: &'a str) -> VerifyFuture<'a> {
        Box::pin(self.verify_token(token))
    }
}
