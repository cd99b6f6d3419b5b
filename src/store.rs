//! Minimal in-process owner of a post batch.
//!
//! Applies intent events the way the application state container does, so
//! the view → event → record loop can be driven end to end without the full
//! application. Failed intents (unknown `pos`) leave the batch unchanged.

use crate::batch::PostBatch;
use crate::events::IntentEvent;
use crate::model::{LinkGroup, PostId, PostRecord};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct PostStore {
    batch: PostBatch,
    pending_links: BTreeSet<PostId>,
}

impl PostStore {
    pub fn new(batch: PostBatch) -> Self {
        Self {
            batch,
            pending_links: BTreeSet::new(),
        }
    }

    pub fn batch(&self) -> &PostBatch {
        &self.batch
    }

    /// Posts whose links were requested but not resolved yet.
    pub fn pending_links(&self) -> impl Iterator<Item = PostId> + '_ {
        self.pending_links.iter().copied()
    }

    /// Apply one intent event. Returns `true` if any record changed.
    pub fn apply(&mut self, event: &IntentEvent) -> bool {
        let changed = match event {
            IntentEvent::SetCurrentPost(pos) => self.set_current(*pos),
            IntentEvent::ChangePostsStatus(change) => {
                self.update_each(&change.ids, |r| {
                    let changed = r.post.read != change.readed;
                    r.post.read = change.readed;
                    changed
                })
            }
            IntentEvent::ChangePostsContentState(change) => {
                self.update_each(&change.ids, |r| {
                    let changed = r.showed != change.showed;
                    r.showed = change.showed;
                    changed
                })
            }
            IntentEvent::ShowPostLinks(pos) => {
                match self.batch.get(*pos) {
                    Some(record) if record.links.is_none() => {
                        self.pending_links.insert(*pos);
                    }
                    Some(_) => tracing::debug!(pos = %pos, "Links already resolved"),
                    None => tracing::debug!(pos = %pos, "Links requested for unknown post"),
                }
                false
            }
        };
        tracing::debug!(event = event.name(), changed, "Applied intent");
        changed
    }

    /// Attach resolved link metadata. Returns `false` for an unknown post.
    pub fn resolve_links(&mut self, pos: PostId, links: LinkGroup) -> bool {
        self.pending_links.remove(&pos);
        match self.batch.records_mut().iter_mut().find(|r| r.pos == pos) {
            Some(record) => {
                record.links = Some(links);
                true
            }
            None => false,
        }
    }

    fn set_current(&mut self, pos: PostId) -> bool {
        if self.batch.get(pos).is_none() {
            tracing::debug!(pos = %pos, "Current post requested for unknown post");
            return false;
        }
        let mut changed = false;
        for record in self.batch.records_mut() {
            let current = record.pos == pos;
            changed |= record.current != current;
            record.current = current;
        }
        changed
    }

    fn update_each(
        &mut self,
        ids: &[PostId],
        mut update: impl FnMut(&mut PostRecord) -> bool,
    ) -> bool {
        let mut changed = false;
        for record in self.batch.records_mut() {
            if ids.contains(&record.pos) {
                changed |= update(record);
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ContentStateChange, StatusChange};

    fn store() -> PostStore {
        let records = (1..=3)
            .map(|pos| PostRecord {
                pos: PostId(pos),
                current: pos == 1,
                ..Default::default()
            })
            .collect();
        PostStore::new(PostBatch::new(records).unwrap())
    }

    #[test]
    fn test_set_current_moves_marker() {
        let mut store = store();
        assert!(store.apply(&IntentEvent::SetCurrentPost(PostId(3))));
        assert_eq!(store.batch().current().map(|r| r.pos), Some(PostId(3)));
        assert_eq!(store.batch().records().iter().filter(|r| r.current).count(), 1);
    }

    #[test]
    fn test_set_current_unknown_is_noop() {
        let mut store = store();
        assert!(!store.apply(&IntentEvent::SetCurrentPost(PostId(99))));
        assert_eq!(store.batch().current().map(|r| r.pos), Some(PostId(1)));
    }

    #[test]
    fn test_status_change_applies_to_all_ids() {
        let mut store = store();
        let event = IntentEvent::ChangePostsStatus(StatusChange {
            ids: vec![PostId(1), PostId(2)],
            readed: true,
        });
        assert!(store.apply(&event));
        let read: Vec<bool> = store.batch().records().iter().map(|r| r.post.read).collect();
        assert_eq!(read, vec![true, true, false]);
        // Same state again changes nothing
        assert!(!store.apply(&event));
    }

    #[test]
    fn test_content_state_change() {
        let mut store = store();
        assert!(store.apply(&IntentEvent::ChangePostsContentState(ContentStateChange {
            ids: vec![PostId(2)],
            showed: true,
        })));
        assert!(store.batch().get(PostId(2)).unwrap().showed);
    }

    #[test]
    fn test_links_request_then_resolve() {
        let mut store = store();
        assert!(!store.apply(&IntentEvent::ShowPostLinks(PostId(2))));
        assert_eq!(store.pending_links().collect::<Vec<_>>(), vec![PostId(2)]);

        assert!(store.resolve_links(PostId(2), LinkGroup::default()));
        assert!(store.batch().get(PostId(2)).unwrap().links.is_some());
        assert_eq!(store.pending_links().count(), 0);

        // Already resolved: request is a no-op
        store.apply(&IntentEvent::ShowPostLinks(PostId(2)));
        assert_eq!(store.pending_links().count(), 0);
    }

    #[test]
    fn test_resolve_unknown_post() {
        let mut store = store();
        assert!(!store.resolve_links(PostId(42), LinkGroup::default()));
    }
}
