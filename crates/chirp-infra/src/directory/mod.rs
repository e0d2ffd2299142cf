//! User directory adapters.

mod memory;

pub use memory::InMemoryDirectory;

#[cfg(feature = "directory")]
mod http;
#[cfg(feature = "directory")]
pub use http::{HttpDirectory, HttpDirectoryConfig};
