//! Application services - procedures expressed against ports only.

mod feed;
mod posts;
mod profile;

#[cfg(test)]
pub(crate) mod testing;

pub use feed::FeedService;
pub use posts::{FEED_PAGE_SIZE, PostService};
pub use profile::ProfileService;

/// Reported when a post's author is missing from the user directory.
pub(crate) const AUTHOR_NOT_FOUND: &str = "Author for post not found";
