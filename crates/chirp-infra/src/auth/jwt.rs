//! JWT session verifier for provider-issued session tokens.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use chirp_core::ports::{AuthError, SessionClaims, SessionVerifier};

const DEV_SECRET: &str = "change-me-in-development";

/// Key material used to check token signatures.
#[derive(Debug, Clone)]
pub enum SessionKey {
    /// HS256 shared secret (development only).
    Secret(String),
    /// RS256 public key in PEM form, as published by the provider.
    RsaPem(String),
}

/// Session verifier configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub key: SessionKey,
    /// Expected `iss`; unchecked when `None`.
    pub issuer: Option<String>,
    /// Allowed clock skew in seconds.
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source.
    ///
    /// Without `SESSION_JWT_PUBLIC_KEY` or `SESSION_JWT_SECRET` the built-in
    /// development secret is used only when `SESSION_JWT_ALLOW_DEV_SECRET`
    /// is set, and never when `RUST_ENV` is production.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AuthError> {
        let key = match (var("SESSION_JWT_PUBLIC_KEY"), var("SESSION_JWT_SECRET")) {
            (Some(pem), _) => SessionKey::RsaPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => SessionKey::Secret(secret),
            (None, None) => {
                let is_production = var("RUST_ENV")
                    .map(|v| v == "production" || v == "prod")
                    .unwrap_or(false);
                let allow_dev = var("SESSION_JWT_ALLOW_DEV_SECRET")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false);

                if is_production {
                    tracing::error!(
                        "SECURITY: No session key configured in production! Set SESSION_JWT_PUBLIC_KEY."
                    );
                    return Err(AuthError::Configuration(
                        "no session key configured in production".to_string(),
                    ));
                }
                if !allow_dev {
                    return Err(AuthError::Configuration(
                        "set SESSION_JWT_PUBLIC_KEY, SESSION_JWT_SECRET, or SESSION_JWT_ALLOW_DEV_SECRET=true"
                            .to_string(),
                    ));
                }

                tracing::warn!("Using development session secret. Set SESSION_JWT_PUBLIC_KEY for production use.");
                SessionKey::Secret(DEV_SECRET.to_string())
            }
        };

        Ok(Self {
            key,
            issuer: var("SESSION_JWT_ISSUER"),
            leeway_secs: var("SESSION_JWT_LEEWAY_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        })
    }
}

/// Claims we read from a session token. Other claims are ignored.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sid: Option<String>,
    exp: i64,
}

/// Verifies session JWTs signed by the identity provider.
pub struct JwtSessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionVerifier {
    pub fn new(config: JwtConfig) -> Result<Self, AuthError> {
        let (decoding_key, algorithm) = match &config.key {
            SessionKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            SessionKey::RsaPem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AuthError::Configuration(e.to_string()))?,
                Algorithm::RS256,
            ),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

impl SessionVerifier for JwtSessionVerifier {
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        if token_data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("Empty subject".to_string()));
        }

        Ok(SessionClaims {
            user_id: token_data.claims.sub,
            session_id: token_data.claims.sid,
            exp: token_data.claims.exp,
        })
    }
}
