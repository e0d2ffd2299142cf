//! Post content rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DomainError;

/// Upper bound on post length, counted in Unicode scalar values.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Every code point must be pictographic or an emoji building block
/// (ZWJ, variation selectors, skin tones, keycaps, regional indicators).
static EMOJI_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\p{Extended_Pictographic}|\p{Emoji_Component})+$")
        .expect("emoji pattern compiles")
});

/// Validated post body: 1..=280 characters, emoji only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Validate raw input. All failed rules are reported together, in the
    /// order emoji-only, minimum length, maximum length. The empty string
    /// fails the emoji rule as well as the minimum.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut messages = Vec::new();
        let len = raw.chars().count();

        if !EMOJI_ONLY.is_match(raw) {
            messages.push("Only emojis are allowed.".to_string());
        }
        if len == 0 {
            messages.push("String must contain at least 1 character(s)".to_string());
        }
        if len > MAX_CONTENT_CHARS {
            messages.push(format!(
                "String must contain at most {} character(s)",
                MAX_CONTENT_CHARS
            ));
        }

        if messages.is_empty() {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::Validation {
                field: "content",
                messages,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
