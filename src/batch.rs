//! A batch of post records rendered as one list.
//!
//! [`PostBatch`] checks the batch invariants up front. [`PostListView`] keeps
//! one [`PostView`] per `pos` across render cycles so each post keeps its own
//! scroll-sync state, and releases views for posts that left the batch.

use crate::model::{PostId, PostRecord};
use crate::view::{PostView, PostViewOptions, Viewport};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("Duplicate post position {0} in batch")]
    DuplicatePos(PostId),

    #[error("More than one current post in batch: {first} and {second}")]
    MultipleCurrent { first: PostId, second: PostId },
}

/// Validated, ordered list of post records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostBatch {
    records: Vec<PostRecord>,
}

impl PostBatch {
    /// Build a batch, rejecting duplicate `pos` values and multiple current posts.
    pub fn new(records: Vec<PostRecord>) -> Result<Self, BatchError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut current: Option<PostId> = None;

        for record in &records {
            if !seen.insert(record.pos) {
                tracing::warn!(pos = %record.pos, "Rejected batch with duplicate pos");
                return Err(BatchError::DuplicatePos(record.pos));
            }
            if record.current {
                if let Some(first) = current {
                    tracing::warn!(%first, second = %record.pos, "Rejected batch with two current posts");
                    return Err(BatchError::MultipleCurrent {
                        first,
                        second: record.pos,
                    });
                }
                current = Some(record.pos);
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [PostRecord] {
        &mut self.records
    }

    pub fn get(&self, pos: PostId) -> Option<&PostRecord> {
        self.records.iter().find(|r| r.pos == pos)
    }

    pub fn current(&self) -> Option<&PostRecord> {
        self.records.iter().find(|r| r.current)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Renders a batch, one retained [`PostView`] per post.
#[derive(Debug, Default)]
pub struct PostListView {
    options: PostViewOptions,
    views: HashMap<PostId, PostView>,
}

impl PostListView {
    pub fn new(options: PostViewOptions) -> Self {
        Self {
            options,
            views: HashMap::new(),
        }
    }

    /// Number of retained per-post views.
    pub fn mounted(&self) -> usize {
        self.views.len()
    }

    /// Render every post in order, or the placeholder for an empty batch,
    /// then run scroll sync for each post.
    pub fn update(&mut self, batch: &PostBatch, viewport: &mut dyn Viewport) -> String {
        self.views.retain(|pos, _| batch.get(*pos).is_some());

        if batch.is_empty() {
            return PostView::new(self.options.clone()).render_placeholder();
        }

        let options = &self.options;
        let mut out = String::new();
        for record in batch.records() {
            let view = self
                .views
                .entry(record.pos)
                .or_insert_with(|| PostView::new(options.clone()));
            out.push_str(&view.update(Some(record), viewport));
        }
        tracing::debug!(posts = batch.len(), "Rendered post list");
        out
    }
}
