use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::research::criteria::DEFAULT_LIMIT;
use crate::research::{FilterCriteria, ResearchConfig, SortKey, SortOrder};

pub const DEFAULT_EXPORT_PATH: &str = "youtube_niche_research.csv";

/// Find small YouTube channels with outlier view counts.
///
/// Requires `YOUTUBE_API_KEY`. Log verbosity follows `RUST_LOG`.
#[derive(Parser, Debug)]
#[command(name = "nichescout", version, about)]
pub struct Cli {
    /// Search keywords; each one is searched independently
    pub keywords: Vec<String>,

    /// Search results per keyword (1-50)
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u8,

    /// Minimum channel subscriber count (inclusive)
    #[arg(long)]
    pub min_subs: Option<u64>,

    /// Maximum channel subscriber count (inclusive)
    #[arg(long)]
    pub max_subs: Option<u64>,

    /// Minimum video view count (inclusive)
    #[arg(long)]
    pub min_views: Option<u64>,

    /// Maximum video view count (inclusive)
    #[arg(long)]
    pub max_views: Option<u64>,

    /// Column to sort results by
    #[arg(long, value_enum, default_value_t = SortBy::Subscribers)]
    pub sort: SortBy,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// CSV export path
    #[arg(short, long, default_value = DEFAULT_EXPORT_PATH)]
    pub output: PathBuf,

    /// Skip the CSV export
    #[arg(long)]
    pub no_export: bool,

    /// Format of the results printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Keywords searched concurrently (1-8); output order is unaffected
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Subscribers,
    Views,
    Likes,
    Comments,
    /// Keep search order
    None,
}

impl SortBy {
    fn key(self) -> Option<SortKey> {
        match self {
            SortBy::Subscribers => Some(SortKey::Subscribers),
            SortBy::Views => Some(SortKey::Views),
            SortBy::Likes => Some(SortKey::Likes),
            SortBy::Comments => Some(SortKey::Comments),
            SortBy::None => None,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl Cli {
    pub fn research_config(&self) -> ResearchConfig {
        let order = if self.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        let mut config = ResearchConfig::new(self.keywords.clone());
        config.limit = self.limit;
        config.criteria = FilterCriteria {
            min_subscribers: self.min_subs,
            max_subscribers: self.max_subs,
            min_views: self.min_views,
            max_views: self.max_views,
        };
        config.sort = self.sort.key().map(|key| (key, order));
        config.concurrency = self.concurrency;
        config
    }
}
