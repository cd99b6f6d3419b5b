//! Post item view.
//!
//! Renders one [`PostRecord`] and turns the four post gestures into intent
//! events. Controls carry a `data-action` attribute so the host can route a
//! click back through [`PostAction::from_data_action`].

use super::scroll::{post_anchor, ScrollSync, Viewport};
use crate::events::{ContentStateChange, Emitter, StatusChange};
use crate::markup::{self, class_list};
use crate::model::{PostRecord, Tag};
use std::fmt::Write as _;

// ============================================================================
// Tag Grouping
// ============================================================================

/// Tags sharing a first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup<'a> {
    /// First character of every tag in the group; `None` for empty tags.
    pub key: Option<char>,
    pub tags: Vec<&'a Tag>,
}

impl TagGroup<'_> {
    pub fn label(&self) -> String {
        self.key.map(String::from).unwrap_or_default()
    }
}

/// Group tags by first character.
///
/// Groups come out in first-seen order and keep the input order inside each
/// group. Whitespace and empty tags form groups like any other key.
pub fn group_tags(tags: &[Tag]) -> Vec<TagGroup<'_>> {
    let mut groups: Vec<TagGroup<'_>> = Vec::new();
    for tag in tags {
        let key = tag.tag.chars().next();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.tags.push(tag),
            None => groups.push(TagGroup {
                key,
                tags: vec![tag],
            }),
        }
    }
    groups
}

// ============================================================================
// Gestures
// ============================================================================

/// User gestures a post understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    SelectAsCurrent,
    ToggleRead,
    RequestLinks,
    ToggleContentExpansion,
}

impl PostAction {
    pub fn data_action(self) -> &'static str {
        match self {
            Self::SelectAsCurrent => "select_current",
            Self::ToggleRead => "toggle_read",
            Self::RequestLinks => "request_links",
            Self::ToggleContentExpansion => "toggle_content",
        }
    }

    pub fn from_data_action(s: &str) -> Option<Self> {
        match s {
            "select_current" => Some(Self::SelectAsCurrent),
            "toggle_read" => Some(Self::ToggleRead),
            "request_links" => Some(Self::RequestLinks),
            "toggle_content" => Some(Self::ToggleContentExpansion),
            _ => None,
        }
    }
}

/// Gesture handlers bound to one record snapshot and the injected emitter.
///
/// Each handler triggers exactly one event and computes the desired state
/// from the snapshot; nothing is written back.
pub struct PostHandlers<'a> {
    record: &'a PostRecord,
    emitter: &'a dyn Emitter,
}

impl<'a> PostHandlers<'a> {
    pub fn new(record: &'a PostRecord, emitter: &'a dyn Emitter) -> Self {
        Self { record, emitter }
    }

    pub fn select_as_current(&self) {
        self.emitter.set_current_post(self.record.pos);
    }

    pub fn toggle_read(&self) {
        self.emitter.change_posts_status(StatusChange {
            ids: vec![self.record.pos],
            readed: !self.record.post.read,
        });
    }

    pub fn request_links(&self) {
        self.emitter.show_post_links(self.record.pos);
    }

    pub fn toggle_content_expansion(&self) {
        self.emitter.change_posts_content_state(ContentStateChange {
            ids: vec![self.record.pos],
            showed: !self.record.showed,
        });
    }

    pub fn dispatch(&self, action: PostAction) {
        tracing::debug!(pos = %self.record.pos, action = action.data_action(), "Post gesture");
        match action {
            PostAction::SelectAsCurrent => self.select_as_current(),
            PostAction::ToggleRead => self.toggle_read(),
            PostAction::RequestLinks => self.request_links(),
            PostAction::ToggleContentExpansion => self.toggle_content_expansion(),
        }
    }
}

// ============================================================================
// View
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostViewOptions {
    /// `target` of the title link
    pub title_target: String,
    /// Placeholder shown for an absent or empty record
    pub no_posts_text: String,
}

impl Default for PostViewOptions {
    fn default() -> Self {
        Self {
            title_target: "_blank".to_string(),
            no_posts_text: "No posts".to_string(),
        }
    }
}

/// View for a single post.
///
/// Owns only the scroll-sync state; everything rendered comes from the record
/// passed in on each cycle.
#[derive(Debug, Default)]
pub struct PostView {
    options: PostViewOptions,
    sync: ScrollSync,
}

impl PostView {
    pub fn new(options: PostViewOptions) -> Self {
        Self {
            options,
            sync: ScrollSync::new(),
        }
    }

    /// Render a full cycle: markup, then the scroll side effect.
    pub fn update(&mut self, record: Option<&PostRecord>, viewport: &mut dyn Viewport) -> String {
        let html = self.render(record);
        if let Some(record) = record {
            self.sync.on_update(record, viewport);
        }
        html
    }

    /// Render markup. Pure: same record, same output.
    pub fn render(&self, record: Option<&PostRecord>) -> String {
        match record {
            Some(record) if !record.is_empty() => self.render_post(record),
            _ => self.render_placeholder(),
        }
    }

    pub fn render_placeholder(&self) -> String {
        format!("<p>{}</p>", markup::text(&self.options.no_posts_text))
    }

    fn render_post(&self, record: &PostRecord) -> String {
        let mut out = String::with_capacity(512);
        let read_class = read_class(record);
        let container_class = class_list(["post", if record.current { "current_post" } else { "" }]);

        let _ = write!(
            out,
            r#"<div class="{}" id="{}" data-pos="{}" data-action="{}">"#,
            container_class,
            post_anchor(record.pos),
            record.pos,
            PostAction::SelectAsCurrent.data_action(),
        );

        let _ = write!(
            out,
            r#"<h3 class="post_title"><a class="post_title_link" href="{}" target="{}">{}</a></h3>"#,
            markup::attr(&record.post.url),
            markup::attr(&self.options.title_target),
            record.post.content.title.inject(),
        );

        let _ = write!(out, r#"<div class="post_meta">{}</div>"#, meta_line(record));

        let body = if record.showed {
            record.post.content.content.inject()
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<div class="{}">{}</div>"#,
            class_list(["post_content", if record.showed { "" } else { "hide" }]),
            body,
        );

        out.push_str(r#"<div class="post_tools">"#);
        let _ = write!(
            out,
            r#"<span class="post_show_content" data-action="{}">{} post</span>"#,
            PostAction::ToggleContentExpansion.data_action(),
            if record.showed { "Hide" } else { "Show" },
        );
        let _ = write!(
            out,
            r#"<span class="post_show_links" data-action="{}">Show links</span>"#,
            PostAction::RequestLinks.data_action(),
        );
        let _ = write!(
            out,
            r#"<span class="read_button {read_class}" data-action="{}">{read_class}</span>"#,
            PostAction::ToggleRead.data_action(),
        );
        let _ = write!(
            out,
            r#"<div class="{}">{}</div>"#,
            class_list([
                "post_links_content",
                if record.links.is_some() { "" } else { "hide" }
            ]),
            links_block(record),
        );
        out.push_str("</div></div>");
        out
    }
}

/// `"read"` or `"unread"`.
fn read_class(record: &PostRecord) -> &'static str {
    if record.post.read {
        "read"
    } else {
        "unread"
    }
}

/// `#pos | category | feed | date [| clusters]`
fn meta_line(record: &PostRecord) -> String {
    let mut line = format!(
        r#"#{} | {} | <b class="post_feed_title">{}</b> | {}"#,
        record.pos,
        markup::text(&record.category_title),
        markup::text(&record.feed_title),
        markup::text(&record.post.date),
    );
    let clusters = record.post.cluster_names();
    if !clusters.is_empty() {
        let _ = write!(line, " | {}", markup::text(&clusters.join(", ")));
    }
    line
}

fn links_block(record: &PostRecord) -> String {
    let Some(links) = &record.links else {
        return String::new();
    };

    let mut out = String::from("<div>");
    let _ = write!(
        out,
        r#"<a href="{}">{}</a>&nbsp;| &nbsp;<a href="{}">{}</a>&nbsp;| &nbsp;<a href="{}">To site</a><br />"#,
        markup::attr(&links.c_url),
        markup::text(&links.c_title),
        markup::attr(&links.f_url),
        markup::text(&links.f_title),
        markup::attr(&links.p_url),
    );
    for group in group_tags(&links.tags) {
        let _ = write!(
            out,
            r#"<div class="post_tag_letter_block"><span class="post_tag_letter">{}</span>"#,
            markup::text(&group.label()),
        );
        for tag in &group.tags {
            let _ = write!(
                out,
                r#"<a href="{}" class="post_tag_link"> {}</a>"#,
                markup::attr(&tag.url),
                markup::text(&tag.tag),
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}
