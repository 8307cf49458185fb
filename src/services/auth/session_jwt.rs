use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use thiserror::Error;

/// Why a session token was rejected.
///
/// `MissingSecret` is a server configuration fault; every other variant is a
/// property of the presented credential.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("token expired")]
    Expired,
    #[error("signature does not verify")]
    BadSignature,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("missing or empty 'userId' claim")]
    MissingSubject,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            other => Self::Malformed(format!("{other:?}")),
        }
    }
}

/// Session token claims.
///
/// NOTE:
/// - `userId` is the subject. It is kept as raw JSON here; converting it to
///   the store key type is the identity resolver's job, so a signed token
///   with an unusable subject is reported there, not as a bad credential.
/// - Claims added by newer token versions land in `extra` instead of failing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId", default)]
    pub user_id: serde_json::Value,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// HS256 session-token verifier.
///
/// The secret is injected at startup. When it is absent the verifier still
/// exists, but every call reports `TokenError::MissingSecret`.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("SessionVerifier")
            .field("configured", &self.decoding_key.is_some())
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl SessionVerifier {
    pub fn new(secret: Option<&str>, leeway_seconds: u64) -> Self {
        let decoding_key = secret.map(|s| DecodingKey::from_secret(s.as_bytes()));

        // signature + exp only; these tokens carry no iss/aud
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature and expiry, then require a non-empty subject.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(TokenError::MissingSecret)?;

        let data = jsonwebtoken::decode::<SessionClaims>(token, key, &self.validation)?;

        if !data.claims.has_subject() {
            return Err(TokenError::MissingSubject);
        }

        Ok(data.claims)
    }
}

impl SessionClaims {
    // null / absent / blank string count as "no subject"
    fn has_subject(&self) -> bool {
        match &self.user_id {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    }
}
