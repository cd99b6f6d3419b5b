//! Intent events emitted by the views.
//!
//! Views never write state. A gesture becomes exactly one [`IntentEvent`]
//! handed to an injected [`Emitter`]; the owning container applies it and
//! delivers a fresh record on the next render cycle.

use crate::model::PostId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tokio::sync::mpsc;

// ============================================================================
// Payloads
// ============================================================================

/// Desired read state for a set of posts.
///
/// Batch-shaped so it shares a contract with bulk "mark all" operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub ids: Vec<PostId>,
    pub readed: bool,
}

/// Desired expansion state for a set of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStateChange {
    pub ids: Vec<PostId>,
    pub showed: bool,
}

// ============================================================================
// Events
// ============================================================================

/// Named request for a state change, serialized as `{"event": NAME, "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum IntentEvent {
    #[serde(rename = "SET_CURRENT_POST")]
    SetCurrentPost(PostId),
    #[serde(rename = "CHANGE_POSTS_STATUS")]
    ChangePostsStatus(StatusChange),
    #[serde(rename = "SHOW_POST_LINKS")]
    ShowPostLinks(PostId),
    #[serde(rename = "CHANGE_POSTS_CONTENT_STATE")]
    ChangePostsContentState(ContentStateChange),
}

impl IntentEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentPost(_) => "SET_CURRENT_POST",
            Self::ChangePostsStatus(_) => "CHANGE_POSTS_STATUS",
            Self::ShowPostLinks(_) => "SHOW_POST_LINKS",
            Self::ChangePostsContentState(_) => "CHANGE_POSTS_CONTENT_STATE",
        }
    }
}

// ============================================================================
// Emitter
// ============================================================================

/// Capability injected by the parent container.
///
/// Implementors provide `trigger`; the per-event methods are the typed surface
/// the views call. Dispatch is fire-and-forget: nothing is returned and a
/// failed delivery is the implementor's concern.
pub trait Emitter {
    fn trigger(&self, event: IntentEvent);

    fn set_current_post(&self, pos: PostId) {
        self.trigger(IntentEvent::SetCurrentPost(pos));
    }

    fn change_posts_status(&self, change: StatusChange) {
        self.trigger(IntentEvent::ChangePostsStatus(change));
    }

    fn show_post_links(&self, pos: PostId) {
        self.trigger(IntentEvent::ShowPostLinks(pos));
    }

    fn change_posts_content_state(&self, change: ContentStateChange) {
        self.trigger(IntentEvent::ChangePostsContentState(change));
    }
}

/// Emitter that keeps every event in order. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    events: RefCell<Vec<IntentEvent>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events triggered so far.
    pub fn events(&self) -> Vec<IntentEvent> {
        self.events.borrow().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<IntentEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Emitter for RecordingEmitter {
    fn trigger(&self, event: IntentEvent) {
        tracing::debug!(event = event.name(), "Intent recorded");
        self.events.borrow_mut().push(event);
    }
}

/// Forward events to the container's event loop.
impl Emitter for mpsc::UnboundedSender<IntentEvent> {
    fn trigger(&self, event: IntentEvent) {
        let name = event.name();
        if self.send(event).is_err() {
            tracing::warn!(event = name, "Event receiver closed, dropping intent");
        } else {
            tracing::debug!(event = name, "Intent dispatched");
        }
    }
}
