//! Post data structure.

use serde::{Deserialize, Serialize};

/// A single forum post as listed on a board page.
///
/// The link doubles as the post's identity: it is always non-empty and
/// absolute by the time a `Post` leaves the extractor, and baseline
/// membership is an exact match on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Post title, whitespace-normalized and capped at 100 characters
    pub title: String,

    /// Absolute URL of the post
    pub link: String,
}

impl Post {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}
