//! Integration tests for the view → intent event → record loop.
//!
//! Each test builds its own batch and drives it through `PostStore`, the same
//! way the owning state container would, then checks the re-rendered markup
//! and the scroll side effect.

use pretty_assertions::assert_eq;
use rsstag_view::batch::{PostBatch, PostListView};
use rsstag_view::events::{IntentEvent, RecordingEmitter, StatusChange};
use rsstag_view::model::{parse_posts, parse_tags, LinkGroup, PostId, Tag};
use rsstag_view::store::PostStore;
use rsstag_view::view::{post_anchor, PostAction, PostHandlers, PostViewOptions, TagView, Viewport};
use std::collections::HashMap;

const POSTS_JSON: &str = r#"[
    {
        "pos": 1, "current": true, "showed": false,
        "category_title": "Tech", "feed_title": "Rust Blog", "links": null,
        "post": {
            "url": "https://blog.example.com/1", "read": false, "date": "2017-05-01",
            "clusters": null,
            "content": {"title": "First", "content": "<p>first body</p>"}
        }
    },
    {
        "pos": 2, "current": false, "showed": false,
        "category_title": "Tech", "feed_title": "Go Blog", "links": null,
        "post": {
            "url": "https://go.example.com/2", "read": true, "date": "2017-05-02",
            "clusters": ["go", "lang"],
            "content": {"title": "Second", "content": "<p>second body</p>"}
        }
    }
]"#;

/// Viewport with every post mounted 100px apart.
#[derive(Default)]
struct RecordingViewport {
    anchors: HashMap<String, u32>,
    scrolls: Vec<u32>,
}

impl RecordingViewport {
    fn for_batch(batch: &PostBatch) -> Self {
        let anchors = batch
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| (post_anchor(r.pos), i as u32 * 100))
            .collect();
        Self {
            anchors,
            scrolls: Vec::new(),
        }
    }
}

impl Viewport for RecordingViewport {
    fn anchor_top(&self, anchor: &str) -> Option<u32> {
        self.anchors.get(anchor).copied()
    }

    fn scroll_to(&mut self, top: u32) {
        self.scrolls.push(top);
    }
}

fn test_store() -> PostStore {
    let records = parse_posts(POSTS_JSON).unwrap();
    PostStore::new(PostBatch::new(records).unwrap())
}

/// Click a control on a post and feed the resulting events back to the store.
fn click(store: &mut PostStore, pos: u64, action: PostAction) -> Vec<IntentEvent> {
    let emitter = RecordingEmitter::new();
    let record = store.batch().get(PostId(pos)).unwrap();
    PostHandlers::new(record, &emitter).dispatch(action);
    let events = emitter.take();
    for event in &events {
        store.apply(event);
    }
    events
}

// ============================================================================
// Read state
// ============================================================================

#[test]
fn test_toggle_read_round_trip() {
    let mut store = test_store();
    let mut list = PostListView::default();
    let mut viewport = RecordingViewport::for_batch(store.batch());

    let html = list.update(store.batch(), &mut viewport);
    assert!(html.contains(r#"<span class="read_button read" data-action="toggle_read">read</span>"#));

    let events = click(&mut store, 2, PostAction::ToggleRead);
    assert_eq!(
        events,
        vec![IntentEvent::ChangePostsStatus(StatusChange {
            ids: vec![PostId(2)],
            readed: false,
        })]
    );

    let html = list.update(store.batch(), &mut viewport);
    let second = &html[html.find(r#"id="p2""#).unwrap()..];
    assert!(second.contains(r#"<span class="read_button unread" data-action="toggle_read">unread</span>"#));
}

// ============================================================================
// Expansion and scroll sync
// ============================================================================

#[test]
fn test_expanding_current_post_scrolls_once() {
    let mut store = test_store();
    let mut list = PostListView::default();
    let mut viewport = RecordingViewport::for_batch(store.batch());

    list.update(store.batch(), &mut viewport);
    assert!(viewport.scrolls.is_empty());

    click(&mut store, 1, PostAction::ToggleContentExpansion);
    let html = list.update(store.batch(), &mut viewport);
    assert!(html.contains("<p>first body</p>"));
    assert_eq!(viewport.scrolls, vec![0]);

    // Unrelated sibling update re-renders without scrolling
    click(&mut store, 2, PostAction::ToggleRead);
    list.update(store.batch(), &mut viewport);
    list.update(store.batch(), &mut viewport);
    assert_eq!(viewport.scrolls, vec![0]);
}

#[test]
fn test_moving_current_then_expanding_scrolls_to_new_post() {
    let mut store = test_store();
    let mut list = PostListView::default();
    let mut viewport = RecordingViewport::for_batch(store.batch());
    list.update(store.batch(), &mut viewport);

    click(&mut store, 2, PostAction::SelectAsCurrent);
    let html = list.update(store.batch(), &mut viewport);
    assert!(html.contains(r#"<div class="post current_post" id="p2""#));
    assert!(viewport.scrolls.is_empty());

    click(&mut store, 2, PostAction::ToggleContentExpansion);
    list.update(store.batch(), &mut viewport);
    assert_eq!(viewport.scrolls, vec![100]);
}

#[test]
fn test_double_toggle_restores_markup() {
    let mut store = test_store();
    let mut list = PostListView::default();
    let mut viewport = RecordingViewport::default();

    let before = list.update(store.batch(), &mut viewport);
    click(&mut store, 1, PostAction::ToggleContentExpansion);
    list.update(store.batch(), &mut viewport);
    click(&mut store, 1, PostAction::ToggleContentExpansion);
    let after = list.update(store.batch(), &mut viewport);

    assert_eq!(before, after);
}

#[test]
fn test_unmounted_anchor_never_panics() {
    let mut store = test_store();
    let mut list = PostListView::default();
    let mut viewport = RecordingViewport::default();

    click(&mut store, 1, PostAction::ToggleContentExpansion);
    list.update(store.batch(), &mut viewport);
    assert!(viewport.scrolls.is_empty());
}

#[test]
fn test_malformed_record_renders_placeholder_among_siblings() {
    let records = parse_posts(
        r#"[
            {"pos": 1, "post": {"url": "https://a.example.com", "content": {"title": "Fine", "content": ""}}},
            {"pos": 2, "post": {"url": "https://b.example.com", "content": ["not", "an", "object"]}},
            {"pos": 3, "post": {"url": "https://c.example.com", "clusters": ["x", null],
                                "content": {"title": "Also fine", "content": ""}}}
        ]"#,
    )
    .unwrap();
    let batch = PostBatch::new(records).unwrap();
    let mut list = PostListView::default();
    let mut viewport = RecordingViewport::for_batch(&batch);

    let html = list.update(&batch, &mut viewport);
    assert!(html.contains(">Fine</a>"));
    assert!(html.contains(">Also fine</a>"));
    assert!(html.contains(" | x</"));
    assert_eq!(html.matches("No posts").count(), 1);
    assert_eq!(list.mounted(), 3);
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn test_links_requested_then_rendered_grouped() {
    let mut store = test_store();
    let mut list = PostListView::new(PostViewOptions::default());
    let mut viewport = RecordingViewport::default();

    let events = click(&mut store, 1, PostAction::RequestLinks);
    assert_eq!(events, vec![IntentEvent::ShowPostLinks(PostId(1))]);
    assert_eq!(store.pending_links().collect::<Vec<_>>(), vec![PostId(1)]);

    store.resolve_links(
        PostId(1),
        LinkGroup {
            c_url: "/c/tech".to_string(),
            c_title: "Tech".to_string(),
            f_url: "/f/rust".to_string(),
            f_title: "Rust Blog".to_string(),
            p_url: "https://blog.example.com/1".to_string(),
            tags: vec![
                Tag::new("Ant", "/t/ant"),
                Tag::new("Bee", "/t/bee"),
                Tag::new("Apple", "/t/apple"),
            ],
        },
    );

    let html = list.update(store.batch(), &mut viewport);
    let a_block = html.find(r#"<span class="post_tag_letter">A</span>"#).unwrap();
    let b_block = html.find(r#"<span class="post_tag_letter">B</span>"#).unwrap();
    let apple = html.find("> Apple</a>").unwrap();
    assert!(a_block < apple && apple < b_block);
}

// ============================================================================
// Tag cloud
// ============================================================================

#[test]
fn test_tag_records_render() {
    let tags = parse_tags(
        r#"[
            {"tag": "rust", "url": "/t/rust", "count": 4, "words": ["rust", "rusty"], "sentiment": ["neg/strong"]},
            {"tag": "go", "url": "/t/go", "count": 1, "words": ["go"], "sentiment": null}
        ]"#,
    )
    .unwrap();

    let view = TagView::default();
    let html: Vec<String> = tags.iter().map(|t| view.render(t)).collect();
    assert!(html[0].contains(r#"<li class="cloud_item neg_strong">"#));
    assert!(html[0].contains("(4)<br />(rust, rusty)<br />"));
    assert!(html[1].contains(r#"<li class="cloud_item">"#));
    assert!(html[1].contains(r#"href="/tag-info/go""#));

    let bigrams = TagView::new(true);
    assert!(tags.iter().all(|t| !bigrams.render(t).contains("get_tag_siblings")));
}
