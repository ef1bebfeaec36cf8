#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use locshare::{
    identity::{IdentityVerifier, VerifyError, VerifyFuture},
    management::LocationStore,
    server,
    state::AppState,
    types::ListScope,
};
use serde_json::Value;
use tower::ServiceExt;

/// Verifier that knows a fixed set of token -> subject pairs.
pub struct StaticVerifier {
    tokens: HashMap<String, String>,
}

impl StaticVerifier {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            tokens: pairs
                .iter()
                .map(|(token, subject)| (token.to_string(), subject.to_string()))
                .collect(),
        }
    }
}

impl IdentityVerifier for StaticVerifier {
    fn verify<'a>(&'a self, token: &'a str) -> VerifyFuture<'a> {
        Box::pin(async move {
            self.tokens
                .get(token)
                .cloned()
                .ok_or_else(|| VerifyError::Rejected("INVALID_ID_TOKEN".to_string()))
        })
    }
}

pub const ALICE_TOKEN: &str = "token-alice";
pub const BOB_TOKEN: &str = "token-bob";

pub fn test_state(list_scope: ListScope) -> AppState {
    let verifier = StaticVerifier::new(&[(ALICE_TOKEN, "1"), (BOB_TOKEN, "2")]);
    AppState::new(
        Arc::new(LocationStore::seeded()),
        Arc::new(verifier),
        list_scope,
    )
}

pub fn test_app(list_scope: ListScope) -> (Router, AppState) {
    let state = test_state(list_scope);
    (server::router(state.clone()), state)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
