use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::NolyxError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

/// A blog post as published in the content blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    /// Publication date as written by the author, usually ISO 8601.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "readTime", default)]
    pub read_time: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Pulls the post list out of a content payload.
///
/// Accepted shapes, first match wins: `{"record":{"posts":[..]}}`,
/// `{"record":[..]}`, `{"posts":[..]}`, `[..]`. Entries that are not posts
/// are skipped.
pub fn extract_posts(payload: &Value) -> Result<Vec<Post>, NolyxError> {
    let candidates = [
        payload.pointer("/record/posts"),
        payload.get("record"),
        payload.get("posts"),
        Some(payload),
    ];

    let items = candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_array)
        .ok_or_else(|| NolyxError::InvalidPayload("no post list found".to_owned()))?;

    let posts = items
        .iter()
        .filter_map(|item| match Post::deserialize(item) {
            Ok(post) => Some(post),
            Err(e) => {
                log::warn!(
                    target: "nolyx",
                    "msg=\"skipping malformed post\", error=\"{e}\""
                );
                None
            }
        })
        .collect();

    Ok(posts)
}
