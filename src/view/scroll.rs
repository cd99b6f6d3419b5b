//! Viewport synchronization for the current post.
//!
//! A post snaps to the top of the viewport when it is current and its
//! expansion state differs from the last value observed while it was current.
//! Re-renders caused by sibling updates leave the viewport alone.

use crate::model::{PostId, PostRecord};

/// Host surface that can locate a mounted post and scroll to it.
pub trait Viewport {
    /// Vertical offset of the element with the given anchor id, or `None`
    /// while it is not mounted.
    fn anchor_top(&self, anchor: &str) -> Option<u32>;

    fn scroll_to(&mut self, top: u32);
}

/// Anchor id carried by a post's container element.
pub fn post_anchor(pos: PostId) -> String {
    format!("p{}", pos)
}

/// Last expansion state observed for a current post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing synchronized yet; compares as collapsed.
    #[default]
    Unsynced,
    Synced(bool),
}

impl SyncState {
    fn retained_showed(self) -> bool {
        match self {
            Self::Unsynced => false,
            Self::Synced(showed) => showed,
        }
    }
}

/// Per-instance edge detector for scroll synchronization.
#[derive(Debug, Default)]
pub struct ScrollSync {
    state: SyncState,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// True when `record` is a qualifying transition.
    pub fn is_pending(&self, record: &PostRecord) -> bool {
        record.current && record.showed != self.state.retained_showed()
    }

    /// Run after each render. Returns `true` if the viewport was scrolled.
    ///
    /// An unmounted anchor is a no-op and leaves the state untouched, so the
    /// next update retries.
    pub fn on_update(&mut self, record: &PostRecord, viewport: &mut dyn Viewport) -> bool {
        if !self.is_pending(record) {
            return false;
        }

        let anchor = post_anchor(record.pos);
        let Some(top) = viewport.anchor_top(&anchor) else {
            tracing::trace!(pos = %record.pos, "Post anchor not mounted, skipping scroll");
            return false;
        };

        viewport.scroll_to(top);
        self.state = SyncState::Synced(record.showed);
        tracing::debug!(pos = %record.pos, top, showed = record.showed, "Scrolled to current post");
        true
    }
}
