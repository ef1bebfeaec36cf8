//! # Identity Module
//!
//! Verification of bearer credentials against an external identity provider.
//! The server never checks token signatures itself: it asks the provider
//! whether a token is valid and which account it belongs to.
//!
//! ## Overview
//!
//! ```text
//! Auth middleware
//!       ↓  verify(token)
//! dyn IdentityVerifier
//!       ↓
//! FirebaseVerifier ── local claim checks (aud, exp, iss)
//!       ↓
//! FirebaseClient ── POST accounts:lookup
//!       ↓
//! Identity Toolkit API
//! ```
//!
//! ## Components
//!
//! - [`IdentityVerifier`] - The seam the middleware depends on. Anything that
//!   can turn a token into a subject identifier implements it.
//! - [`FirebaseVerifier`] - Production verifier backed by Firebase
//!   Authentication.
//! - [`FirebaseClient`] - Thin typed client for the Identity Toolkit REST API
//!   (token lookup and custom token exchange).
//! - [`ServiceAccount`] - The service account key file the verifier takes its
//!   project id from.
//! - [`mint_custom_token`] / [`issue_id_token`] - Test tooling: sign a custom
//!   token with the service account key and trade it for an ID token.
//!
//! ## Getting a token by hand
//!
//! ```text
//! ServiceAccount ── RS256 custom token (uid, phone_number claim)
//!       ↓
//! FirebaseClient ── POST accounts:signInWithCustomToken
//!       ↓
//! ID token, accepted by FirebaseVerifier
//! ```
//!
//! ## Lifecycle
//!
//! The verifier is built once in `main` and handed to the router inside the
//! application state. There is no global client.

mod credentials;
mod custom_token;
mod firebase;

pub use credentials::ServiceAccount;
pub use custom_token::{CUSTOM_TOKEN_AUDIENCE, issue_id_token, mint_custom_token};
pub use firebase::{FirebaseClient, FirebaseVerifier};

use std::{future::Future, path::PathBuf, pin::Pin};

use thiserror::Error;

/// Future returned by [`IdentityVerifier::verify`].
pub type VerifyFuture<'a> = Pin<Box<dyn Future<Output = Result<String, VerifyError>> + Send + 'a>>;

/// Resolves a bearer token to the subject identifier it was issued for.
pub trait IdentityVerifier: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> VerifyFuture<'a>;
}

/// Why a single token was not accepted.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("{0}")]
    Rejected(String),

    #[error("identity provider unreachable: {0}")]
    Provider(#[from] reqwest::Error),
}

/// Failures while setting up the identity layer or talking to the provider
/// outside of request verification.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("cannot read credentials file {path}: {source}")]
    Credentials {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid credentials file: {0}")]
    CredentialsFormat(#[from] serde_json::Error),

    #[error("unsupported credentials type '{0}', expected a service account key")]
    UnsupportedCredentials(String),

    #[error("credentials file has no project_id")]
    MissingProjectId,

    #[error("credentials file has no client_email or private_key, cannot sign tokens")]
    MissingSigningKey,

    #[error("invalid uid: {0}")]
    InvalidUid(String),

    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("cannot sign custom token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("FIREBASE_API_KEY is not set")]
    MissingApiKey,

    #[error("cannot build identity provider client: {0}")]
    Client(reqwest::Error),

    #[error("identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity provider error: {0}")]
    Provider(String),
}
