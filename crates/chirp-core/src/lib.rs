//! # Chirp Core
//!
//! The domain layer of the Chirp feed service.
//! Pure business logic: entities, content rules, ports, and the services
//! that compose them. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
