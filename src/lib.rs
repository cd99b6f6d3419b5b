//! Post and tag item views for the rsstag feed reader.
//!
//! Views render records owned by an external state container into HTML and
//! report user gestures back as intent events; they never mutate records.
//!
//! - [`model`] - post and tag records
//! - [`markup`] - escaping and the trusted-fragment injection point
//! - [`events`] - intent events and the [`events::Emitter`] capability
//! - [`view`] - post view, tag view, scroll synchronization
//! - [`batch`] - batch invariants and list rendering
//! - [`store`] - reference owner that applies intent events
//! - [`config`] - TOML view configuration
//!
//! ```
//! use rsstag_view::events::RecordingEmitter;
//! use rsstag_view::model::{PostId, PostRecord};
//! use rsstag_view::view::{PostHandlers, PostView};
//!
//! let record = PostRecord { pos: PostId(1), ..Default::default() };
//! let emitter = RecordingEmitter::new();
//! PostHandlers::new(&record, &emitter).toggle_read();
//! assert_eq!(emitter.events().len(), 1);
//!
//! // An empty record renders the placeholder
//! assert_eq!(PostView::default().render(Some(&record)), "<p>No posts</p>");
//! ```

pub mod batch;
pub mod config;
pub mod events;
pub mod markup;
pub mod model;
pub mod store;
pub mod view;
