//! Markup helpers shared by the views.
//!
//! All escaping goes through `html_escape`. Upstream-rendered markup is carried
//! as a [`TrustedFragment`] and leaves this module only through
//! [`TrustedFragment::inject`]; that is the single place a sanitizer would hook in.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Markup produced upstream and injected without escaping.
///
/// Content is NOT sanitized. Titles and post bodies arrive from feeds and may
/// carry scripts or iframes; any cleaning belongs in [`TrustedFragment::inject`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedFragment(String);

impl TrustedFragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw-injection point for every view.
    pub fn inject(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrustedFragment {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TrustedFragment {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Escape text content.
pub fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape a value placed inside a double-quoted attribute.
pub fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Join class tokens, skipping empty ones.
pub fn class_list<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_is_verbatim() {
        let fragment = TrustedFragment::from("<script>x()</script><b>t</b>");
        assert_eq!(fragment.inject(), "<script>x()</script><b>t</b>");
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(text("a < b & c"), "a &lt; b &amp; c");
        assert!(matches!(text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_attr_escaping() {
        assert_eq!(attr(r#"x" onclick="y"#), "x&quot; onclick=&quot;y");
    }

    #[test]
    fn test_class_list_skips_empty() {
        assert_eq!(class_list(["post", "", "current_post"]), "post current_post");
        assert_eq!(class_list(["cloud_item", ""]), "cloud_item");
    }
}
