//! Records supplied by the owning state container.
//!
//! Records are snapshots: views borrow them for one render cycle and never
//! mutate them. Every struct deserializes leniently (missing fields and JSON
//! `null` fall back to defaults) so a malformed record degrades to an empty
//! rendering instead of failing the whole list.

use crate::markup::TrustedFragment;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while decoding a record batch.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Input is not JSON, or its top level is not an array of records
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Post Records
// ============================================================================

/// Stable identity of a post within a rendering batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PostId)
    }
}

/// One post as the list view sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub pos: PostId,
    /// Scroll target marker; at most one record per batch
    #[serde(deserialize_with = "null_as_default")]
    pub current: bool,
    /// Whether the post body is expanded
    #[serde(deserialize_with = "null_as_default")]
    pub showed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub category_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub feed_title: String,
    /// `None` means links are not resolved yet, not that there are none.
    pub links: Option<LinkGroup>,
    #[serde(deserialize_with = "null_as_default")]
    pub post: PostBody,
}

impl PostRecord {
    /// Records without a body title and content carry nothing to display.
    pub fn is_empty(&self) -> bool {
        self.post.url.is_empty()
            && self.post.content.title.is_empty()
            && self.post.content.content.is_empty()
    }

    /// Empty record keeping only the identity, rendered as the placeholder.
    pub fn placeholder(pos: PostId) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostBody {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub read: bool,
    /// Pre-formatted by upstream
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Upstream may send `null` entries; they are skipped when displayed.
    pub clusters: Option<Vec<Option<String>>>,
    #[serde(deserialize_with = "null_as_default")]
    pub content: PostContent,
}

impl PostBody {
    /// Non-null cluster names in their given order.
    pub fn cluster_names(&self) -> Vec<&str> {
        self.clusters
            .iter()
            .flatten()
            .filter_map(|c| c.as_deref())
            .collect()
    }
}

/// Upstream-rendered markup for the title and body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostContent {
    #[serde(deserialize_with = "null_as_default")]
    pub title: TrustedFragment,
    #[serde(deserialize_with = "null_as_default")]
    pub content: TrustedFragment,
}

/// Resolved link metadata for a post: category, feed, original page and tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub c_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub c_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub f_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub f_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub p_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Tag {
    pub fn new(tag: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            url: url.into(),
        }
    }
}

// ============================================================================
// Tag Records
// ============================================================================

/// One entry of the tag cloud.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub words: Vec<String>,
    /// Slash-delimited category codes, e.g. `"pos/strong"`; only the first is used.
    pub sentiment: Option<Vec<String>>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a JSON array of post records.
///
/// Only a malformed outer array is an error. A record that fails to decode
/// becomes [`PostRecord::placeholder`] when its `pos` can still be read, and
/// is dropped otherwise, so one bad record never takes down the list.
pub fn parse_posts(json: &str) -> Result<Vec<PostRecord>, RecordError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let pos = value.get("pos").and_then(serde_json::Value::as_u64);
        match serde_json::from_value::<PostRecord>(value) {
            Ok(record) => records.push(record),
            Err(error) => match pos {
                Some(pos) => {
                    tracing::warn!(index, pos, %error, "Malformed post record, rendering placeholder");
                    records.push(PostRecord::placeholder(PostId(pos)));
                }
                None => {
                    tracing::warn!(index, %error, "Malformed post record without pos, skipping");
                }
            },
        }
    }

    tracing::debug!(count = records.len(), "Decoded post records");
    Ok(records)
}

/// Decode a JSON array of tag records. Malformed entries are skipped.
pub fn parse_tags(json: &str) -> Result<Vec<TagRecord>, RecordError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<TagRecord>(value) {
            Ok(record) => records.push(record),
            Err(error) => tracing::warn!(index, %error, "Malformed tag record, skipping"),
        }
    }

    tracing::debug!(count = records.len(), "Decoded tag records");
    Ok(records)
}
