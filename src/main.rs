use anyhow::{Context, Result};
use clap::Parser;
use rsstag_view::batch::{PostBatch, PostListView};
use rsstag_view::config::ViewConfig;
use rsstag_view::events::RecordingEmitter;
use rsstag_view::model::{parse_posts, parse_tags, PostId};
use rsstag_view::store::PostStore;
use rsstag_view::view::{post_anchor, PostAction, PostHandlers, TagView, Viewport};
use std::path::{Path, PathBuf};

/// Maximum record file size (16 MB)
const MAX_INPUT_SIZE: u64 = 16 * 1_048_576;

#[derive(Parser, Debug)]
#[command(
    name = "rsstag-view",
    about = "Render rsstag post or tag records to HTML"
)]
struct Args {
    /// View configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON array of post records
    #[arg(long, value_name = "FILE", conflicts_with = "tags", required_unless_present = "tags")]
    posts: Option<PathBuf>,

    /// JSON array of tag records
    #[arg(long, value_name = "FILE")]
    tags: Option<PathBuf>,

    /// Render tags as bigrams (overrides config)
    #[arg(long)]
    bigram: bool,

    /// Simulate a click on a post control, e.g. `toggle_read@3`
    #[arg(long, value_name = "ACTION@POS", value_parser = parse_click, requires = "posts")]
    click: Vec<(PostAction, PostId)>,
}

fn parse_click(s: &str) -> Result<(PostAction, PostId), String> {
    let (action, pos) = s
        .split_once('@')
        .ok_or_else(|| format!("expected ACTION@POS, got '{}'", s))?;
    let action = PostAction::from_data_action(action.trim()).ok_or_else(|| {
        format!(
            "unknown action '{}' (select_current, toggle_read, request_links, toggle_content)",
            action
        )
    })?;
    let pos = pos
        .parse::<PostId>()
        .map_err(|e| format!("invalid post position '{}': {}", pos, e))?;
    Ok((action, pos))
}

/// Viewport over the rendered list where each post occupies one row.
struct ListViewport {
    anchors: Vec<String>,
}

impl ListViewport {
    fn new(batch: &PostBatch) -> Self {
        Self {
            anchors: batch.records().iter().map(|r| post_anchor(r.pos)).collect(),
        }
    }
}

impl Viewport for ListViewport {
    fn anchor_top(&self, anchor: &str) -> Option<u32> {
        self.anchors
            .iter()
            .position(|a| a == anchor)
            .and_then(|row| u32::try_from(row).ok())
    }

    fn scroll_to(&mut self, top: u32) {
        tracing::info!(top, "Viewport scrolled");
    }
}

fn read_input(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read record file '{}'", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Record path must be a regular file: {}", path.display());
    }
    if metadata.len() > MAX_INPUT_SIZE {
        anyhow::bail!(
            "Record file is {} bytes (max {} bytes)",
            metadata.len(),
            MAX_INPUT_SIZE
        );
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file '{}'", path.display()))
}

fn render_posts(path: &Path, config: &ViewConfig, clicks: &[(PostAction, PostId)]) -> Result<String> {
    let records = parse_posts(&read_input(path)?).context("Failed to decode post records")?;
    let batch = PostBatch::new(records).context("Invalid post batch")?;

    let mut viewport = ListViewport::new(&batch);
    let mut list = PostListView::new(config.post_view_options());
    let mut store = PostStore::new(batch);
    let mut html = list.update(store.batch(), &mut viewport);

    let emitter = RecordingEmitter::new();
    for &(action, pos) in clicks {
        match store.batch().get(pos) {
            Some(record) => PostHandlers::new(record, &emitter).dispatch(action),
            None => {
                eprintln!("Warning: no post at position {}, click ignored", pos);
                continue;
            }
        }

        for event in emitter.take() {
            eprintln!(
                "{}",
                serde_json::to_string(&event).context("Failed to encode event")?
            );
            store.apply(&event);
        }
        html = list.update(store.batch(), &mut viewport);
    }

    let pending: Vec<String> = store.pending_links().map(|p| p.to_string()).collect();
    if !pending.is_empty() {
        tracing::info!(posts = %pending.join(","), "Link metadata requested");
    }

    Ok(html)
}

fn render_tags(path: &Path, config: &ViewConfig) -> Result<String> {
    let records = parse_tags(&read_input(path)?).context("Failed to decode tag records")?;
    let view = TagView::from_config(config);
    tracing::debug!(tags = records.len(), bigram_mode = view.bigram_mode, "Rendering tag cloud");
    Ok(records.iter().map(|tag| view.render(tag)).collect())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => ViewConfig::default(),
    };
    if args.bigram {
        config.bigram_mode = true;
    }

    let html = match (&args.posts, &args.tags) {
        (Some(posts), _) => render_posts(posts, &config, &args.click)?,
        (None, Some(tags)) => render_tags(tags, &config)?,
        (None, None) => anyhow::bail!("One of --posts or --tags is required"),
    };

    println!("{}", html);
    Ok(())
}
