//! Domain entities - the core business objects.

mod author;
mod content;
mod feed;
mod post;

pub use author::{AuthorView, DirectoryUser};
pub use content::{MAX_CONTENT_CHARS, PostContent};
pub use feed::FeedItem;
pub use post::Post;
