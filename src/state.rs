use std::sync::Arc;

use crate::{identity::IdentityVerifier, management::LocationStore, types::ListScope};

/// Shared application state handed to every handler and to the auth middleware.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LocationStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub list_scope: ListScope,
}

impl AppState {
    pub fn new(
        store: Arc<LocationStore>,
        verifier: Arc<dyn IdentityVerifier>,
        list_scope: ListScope,
    ) -> Self {
        Self {
            store,
            verifier,
            list_scope,
        }
    }
}
