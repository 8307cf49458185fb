//! Factory: build `SessionService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::user_repo::UserStore;
use crate::services::auth::{IdentityResolver, SessionService, SessionVerifier};

pub fn build_session_service(config: &Config, store: Arc<dyn UserStore>) -> Arc<SessionService> {
    let verifier = SessionVerifier::new(config.jwt_secret.as_deref(), config.token_leeway_seconds);

    if !verifier.is_configured() {
        // Keep serving: /verify and /me answer 500 until the secret is provided
        tracing::error!("JWT_SECRET is not set; session verification will fail with 500");
    }

    Arc::new(SessionService::new(verifier, IdentityResolver::new(store)))
}
