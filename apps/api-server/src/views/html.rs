//! HTML building blocks.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

use chirp_shared::dto::FeedItemResponse;

use super::time::relative_time;

/// Element id of the embedded query state.
pub const STATE_ELEMENT_ID: &str = "__CHIRP_STATE__";

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Query results prefetched on the server, keyed by procedure path and input.
#[derive(Debug, Default)]
pub struct DehydratedState {
    queries: Map<String, Value>,
}

impl DehydratedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I: Serialize, D: Serialize>(&mut self, path: &str, input: I, data: D) {
        let input = serde_json::to_value(input).unwrap_or(Value::Null);
        let key = json!([path, input]).to_string();
        let data = serde_json::to_value(data).unwrap_or(Value::Null);
        self.queries.insert(key, data);
    }

    /// JSON safe to place inside a `<script>` element.
    pub fn to_script_json(&self) -> String {
        json!({ "queries": self.queries })
            .to_string()
            .replace('<', "\\u003c")
    }
}

/// Wrap a page body in the site layout.
pub fn layout(title: &str, body: &str, state: &DehydratedState) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="/favicon.ico">
</head>
<body>
<main class="feed">
{body}
</main>
<script type="application/json" id="{STATE_ELEMENT_ID}">{state}</script>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
        state = state.to_script_json(),
    )
}

/// The same page for every failed read.
pub fn error_page() -> String {
    layout(
        "Chirp",
        r#"<div class="error"><h1>Something went wrong</h1><p><a href="/">Back to the feed</a></p></div>"#,
        &DehydratedState::new(),
    )
}

/// Author handle; only authors with a username have a profile page to link.
fn author_label(item: &FeedItemResponse) -> (String, String) {
    match item.author.username.as_deref() {
        Some(username) => {
            let name = escape_html(username);
            (format!(r#"<a href="/@{name}">@{name}</a>"#), format!("@{name}"))
        }
        None => {
            let id = escape_html(&item.author.id);
            (format!(r#"<span class="author">{id}</span>"#), id)
        }
    }
}

/// One post with its author.
pub fn post_view(item: &FeedItemResponse, now: DateTime<Utc>) -> String {
    let (author, name) = author_label(item);
    format!(
        r#"<article class="post">
<img class="avatar" src="{image}" alt="{name}'s profile picture" width="56" height="56">
<div>
<div class="meta">{author} · <a href="/post/{id}">{when}</a></div>
<p class="content">{content}</p>
</div>
</article>"#,
        image = escape_html(&item.author.image_url),
        author = author,
        name = name,
        id = item.post.id,
        when = relative_time(item.post.created_at, now),
        content = escape_html(&item.post.content),
    )
}

/// A list of posts, or `empty` when there are none.
pub fn feed_view(items: &[FeedItemResponse], now: DateTime<Utc>, empty: &str) -> String {
    if items.is_empty() {
        return format!(r#"<p class="empty">{}</p>"#, escape_html(empty));
    }
    items
        .iter()
        .map(|item| post_view(item, now))
        .collect::<Vec<_>>()
        .join("\n")
}
