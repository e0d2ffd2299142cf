//! Session verification implementations.

mod jwt;

pub use jwt::{JwtConfig, JwtSessionVerifier, SessionKey};
