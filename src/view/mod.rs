//! List item views for the feed reader.
//!
//! - `post` - [`PostView`]: post rendering, tag grouping and gesture handlers
//! - `scroll` - [`ScrollSync`]: keeps the viewport on the current post
//! - `tag` - [`TagView`]: tag cloud entry
//!
//! Views are pure functions of a record plus injected capabilities. The only
//! state they keep is the scroll-sync edge detector.

mod post;
mod scroll;
mod tag;

pub use post::{group_tags, PostAction, PostHandlers, PostView, PostViewOptions, TagGroup};
pub use scroll::{post_anchor, ScrollSync, SyncState, Viewport};
pub use tag::{sentiment_class, TagView};
