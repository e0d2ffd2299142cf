//! Session verification port.
//!
//! Sessions are issued by the hosted identity provider; this side only
//! verifies them.

/// Claims carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Directory id of the signed-in user (`sub`).
    pub user_id: String,
    /// Provider session id (`sid`), when present.
    pub session_id: Option<String>,
    pub exp: i64,
}

/// Verifies provider-issued session tokens.
pub trait SessionVerifier: Send + Sync {
    /// Validate and decode a token.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing session token")]
    MissingAuth,

    #[error("Verifier misconfigured: {0}")]
    Configuration(String),
}
