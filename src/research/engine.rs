use std::collections::{HashMap, HashSet};
use std::fmt;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::criteria::{ConfigError, ResearchConfig};
use super::join::join_hits;
use super::table::{ResultRow, ResultTable};
use crate::youtube::types::{ChannelStats, VideoStats};
use crate::youtube::{MAX_BATCH_SIZE, VideoPlatform, YouTubeError};

#[derive(Debug)]
pub struct ResearchReport {
    pub table: ResultTable,
    pub warnings: Vec<KeywordWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    VideoStats,
    ChannelStats,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Search => "search",
            Stage::VideoStats => "video statistics",
            Stage::ChannelStats => "channel statistics",
        })
    }
}

/// A keyword that contributed no rows because an upstream call failed.
#[derive(Debug)]
pub struct KeywordWarning {
    pub keyword: String,
    pub stage: Stage,
    pub reason: String,
}

impl KeywordWarning {
    fn new(keyword: &str, stage: Stage, err: YouTubeError) -> Self {
        Self {
            keyword: keyword.to_string(),
            stage,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for KeywordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} failed ({})", self.keyword, self.stage, self.reason)
    }
}

/// Run one research pass: search every keyword, enrich, join, filter, and assemble.
///
/// The configuration is validated before the first request. After that, upstream
/// failures only ever skip the affected keyword.
pub async fn research(
    platform: &impl VideoPlatform,
    config: &ResearchConfig,
) -> Result<ResearchReport, ConfigError> {
    config.validate()?;

    let outcomes: Vec<_> = stream::iter(&config.keywords)
        .map(|keyword| async move {
            let keyword = keyword.trim();
            (keyword, research_keyword(platform, keyword, config).await)
        })
        .buffered(config.concurrency)
        .collect()
        .await;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();
    for (keyword, outcome) in outcomes {
        match outcome {
            Ok(keyword_rows) => {
                info!(keyword, rows = keyword_rows.len(), "keyword complete");
                rows.extend(keyword_rows);
            }
            Err(w) => {
                warn!(keyword, stage = %w.stage, error = %w.reason, "keyword skipped");
                warnings.push(w);
            }
        }
    }

    let mut table = ResultTable::new(rows);
    if let Some((key, order)) = config.sort {
        table.sort_by(key, order);
    }

    info!(
        rows = table.len(),
        skipped = warnings.len(),
        "research complete"
    );
    Ok(ResearchReport { table, warnings })
}

async fn research_keyword(
    platform: &impl VideoPlatform,
    keyword: &str,
    config: &ResearchConfig,
) -> Result<Vec<ResultRow>, KeywordWarning> {
    info!(keyword, limit = config.limit, "searching");
    let hits = platform
        .search(keyword, config.limit)
        .await
        .map_err(|e| KeywordWarning::new(keyword, Stage::Search, e))?;
    if hits.is_empty() {
        return Ok(Vec::new());
    }

    let video_ids = unique_ids(hits.iter().map(|h| h.video_id.as_str()));
    let channel_ids = unique_ids(hits.iter().map(|h| h.channel_id.as_str()));

    let videos = fetch_video_stats(platform, &video_ids)
        .await
        .map_err(|e| KeywordWarning::new(keyword, Stage::VideoStats, e))?;
    let channels = fetch_channel_stats(platform, &channel_ids)
        .await
        .map_err(|e| KeywordWarning::new(keyword, Stage::ChannelStats, e))?;

    Ok(join_hits(keyword, &hits, &videos, &channels, &config.criteria))
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(String::from)
        .collect()
}

async fn fetch_video_stats(
    platform: &impl VideoPlatform,
    ids: &[String],
) -> Result<HashMap<String, VideoStats>, YouTubeError> {
    let mut stats = HashMap::with_capacity(ids.len());
    for batch in ids.chunks(MAX_BATCH_SIZE) {
        stats.extend(platform.video_stats(batch).await?);
    }
    Ok(stats)
}

async fn fetch_channel_stats(
    platform: &impl VideoPlatform,
    ids: &[String],
) -> Result<HashMap<String, ChannelStats>, YouTubeError> {
    let mut stats = HashMap::with_capacity(ids.len());
    for batch in ids.chunks(MAX_BATCH_SIZE) {
        stats.extend(platform.channel_stats(batch).await?);
    }
    Ok(stats)
}
