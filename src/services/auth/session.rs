use tracing::{debug, error, warn};

use crate::error::AppError;
use crate::services::auth::identity::{IdentityResolver, ResolveError, UserProfile};
use crate::services::auth::session_jwt::{SessionClaims, SessionVerifier, TokenError};

/// Service that wires token verification and identity resolution together.
///
/// - `verify_token` is the lightweight path (signature + expiry only).
/// - `current_user` additionally resolves the subject against the identity store.
///
/// Both log the concrete failure reason and hand back an `AppError`, which only
/// carries the HTTP-relevant category.
#[derive(Clone, Debug)]
pub struct SessionService {
    verifier: SessionVerifier,
    identity: IdentityResolver,
}

impl SessionService {
    pub fn new(verifier: SessionVerifier, identity: IdentityResolver) -> Self {
        Self { verifier, identity }
    }

    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.verifier.verify(token).map_err(|err| {
            match &err {
                TokenError::MissingSecret => {
                    error!("JWT_SECRET is not configured; cannot verify session tokens");
                }
                TokenError::Expired => debug!("session token expired"),
                _ => warn!(error = %err, "session token verification failed"),
            }
            AppError::from(err)
        })
    }

    pub async fn current_user(&self, token: &str) -> Result<UserProfile, AppError> {
        let claims = self.verify_token(token)?;

        self.identity.resolve(&claims).await.map_err(|err| {
            match &err {
                ResolveError::NotFound => {
                    warn!(user_id = %claims.user_id, "valid session token for unknown user");
                }
                ResolveError::InvalidSubject(_) => {
                    error!(error = %err, "session token carries an unusable subject");
                }
                ResolveError::Store(e) => {
                    error!(
                        backend = self.identity.backend_name(),
                        error = ?e,
                        "identity store lookup failed"
                    );
                }
            }
            AppError::from(err)
        })
    }
}
