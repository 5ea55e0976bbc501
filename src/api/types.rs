//! Shared types for the HTTP API layer.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::ServiceConfig;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
///
/// Read-only after construction; cloned per request.
#[derive(Clone)]
pub struct ApiContext {
    pub verifier: Arc<TokenVerifier>,
}

impl ApiContext {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(TokenVerifier::new(
            config.jwt_secret.clone(),
            config.token_leeway_secs,
        ))
    }
}

// ═══════════════════════════════════════════════════════════
// Principal: injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated caller, injected into request extensions by the auth
/// middleware after successful token validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}
