//! # Chirp Shared
//!
//! Wire types shared by the RPC surface and any client.
//! Field names are camelCase on the wire.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
