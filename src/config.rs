//! View configuration loaded from a TOML file.
//!
//! The file is optional; a missing or empty file yields `ViewConfig::default()`.
//! Unknown keys are accepted and logged as warnings so typos are visible.
use crate::view::PostViewOptions;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Settings shared by the post and tag views.
///
/// Every field has a default, so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Render tags as bigrams (no per-tag drill-down link).
    pub bigram_mode: bool,

    /// Prefix of the per-tag detail link.
    pub tag_info_base: String,

    /// Placeholder shown when there is no post to render.
    pub no_posts_text: String,

    /// `target` attribute of post title links.
    pub title_target: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            bigram_mode: false,
            tag_info_base: "/tag-info/".to_string(),
            no_posts_text: "No posts".to_string(),
            title_target: "_blank".to_string(),
        }
    }
}

impl ViewConfig {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 4] =
        ["bigram_mode", "tag_info_base", "no_posts_text", "title_target"];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(ViewConfig::default())`
    /// - Empty file → `Ok(ViewConfig::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let len = file.metadata()?.len();
        if len > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "Config file is {} bytes (max {} bytes)",
                len,
                Self::MAX_FILE_SIZE
            )));
        }

        // The open handle is read directly, capped at the limit in case the file grows.
        let mut content = String::new();
        file.take(Self::MAX_FILE_SIZE).read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: ViewConfig = toml::from_str(content)?;
        tracing::info!(bigram_mode = config.bigram_mode, "Loaded view configuration");
        Ok(config)
    }

    pub fn post_view_options(&self) -> PostViewOptions {
        PostViewOptions {
            title_target: self.title_target.clone(),
            no_posts_text: self.no_posts_text.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
