//! Tag cloud entry. Display only; emits no events.

use crate::config::ViewConfig;
use crate::markup::{self, class_list};
use crate::model::TagRecord;
use std::fmt::Write as _;

/// CSS class derived from the first sentiment code.
///
/// Only the first `/` is replaced: `"a/b/c"` becomes `"a_b/c"`.
pub fn sentiment_class(record: &TagRecord) -> String {
    record
        .sentiment
        .as_ref()
        .and_then(|codes| codes.first())
        .map(|code| code.replacen('/', "_", 1))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    /// Bigrams have no detail page, so the drill-down link is omitted.
    pub bigram_mode: bool,
    /// Prefix of the per-tag detail link
    pub tag_info_base: String,
}

impl Default for TagView {
    fn default() -> Self {
        Self {
            bigram_mode: false,
            tag_info_base: "/tag-info/".to_string(),
        }
    }
}

impl TagView {
    pub fn new(bigram_mode: bool) -> Self {
        Self {
            bigram_mode,
            ..Default::default()
        }
    }

    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            bigram_mode: config.bigram_mode,
            tag_info_base: config.tag_info_base.clone(),
        }
    }

    pub fn render(&self, record: &TagRecord) -> String {
        let sentiment = sentiment_class(record);
        let mut out = String::with_capacity(256);

        let _ = write!(
            out,
            r#"<div style="display: inline-block"><a name="{}"></a><li class="{}">"#,
            markup::attr(&record.tag),
            class_list(["cloud_item", sentiment.as_str()]),
        );
        let _ = write!(
            out,
            r#"<a href="{}" class="cloud_item_title">{}</a> ({})<br />({})<br />"#,
            markup::attr(&record.url),
            markup::text(&record.tag),
            record.count,
            markup::text(&record.words.join(", ")),
        );
        if !self.bigram_mode {
            let href = format!("{}{}", self.tag_info_base, record.tag);
            let _ = write!(
                out,
                r#"<a href="{}" class="get_tag_siblings">...</a>"#,
                markup::attr(&href),
            );
        }
        out.push_str("</li></div>");
        out
    }
}
