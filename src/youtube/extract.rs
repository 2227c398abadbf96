use std::collections::HashMap;

use tracing::debug;

use super::types::{
    ChannelItem, ChannelStats, ListResponse, SearchHit, SearchItem, VideoItem, VideoStats,
};

/// Parse a wire count. Absent or non-numeric values count as zero.
pub fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Convert search items into hits, keeping API rank order.
/// Items without a video id or channel id cannot be joined and are dropped.
pub fn extract_hits(response: ListResponse<SearchItem>) -> Vec<SearchHit> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.and_then(|id| id.video_id).filter(|v| !v.is_empty());
            let Some(snippet) = item.snippet else {
                debug!(?video_id, "search item without snippet dropped");
                return None;
            };
            let channel_id = snippet.channel_id.filter(|c| !c.is_empty());
            let (Some(video_id), Some(channel_id)) = (video_id, channel_id) else {
                debug!("search item without video/channel id dropped");
                return None;
            };
            Some(SearchHit {
                video_id,
                channel_id,
                title: snippet.title.unwrap_or_default(),
                description: snippet.description.unwrap_or_default(),
                published_at: snippet.published_at.unwrap_or_default(),
                channel_title: snippet.channel_title.unwrap_or_default(),
            })
        })
        .collect()
}

/// Items without an id are dropped; the rest of the batch is kept.
pub fn extract_video_stats(response: ListResponse<VideoItem>) -> HashMap<String, VideoStats> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let Some(id) = item.id.filter(|id| !id.is_empty()) else {
                debug!("video item without id dropped");
                return None;
            };
            let stats = item.statistics.as_ref();
            let (published_at, title) = item
                .snippet
                .map(|s| (s.published_at, s.title))
                .unwrap_or_default();
            let video = VideoStats {
                view_count: parse_count(stats.and_then(|s| s.view_count.as_deref())),
                like_count: parse_count(stats.and_then(|s| s.like_count.as_deref())),
                comment_count: parse_count(stats.and_then(|s| s.comment_count.as_deref())),
                published_at,
                title,
            };
            Some((id, video))
        })
        .collect()
}

pub fn extract_channel_stats(
    response: ListResponse<ChannelItem>,
) -> HashMap<String, ChannelStats> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let Some(id) = item.id.filter(|id| !id.is_empty()) else {
                debug!("channel item without id dropped");
                return None;
            };
            let subscriber_count = match item.statistics {
                Some(s) if !s.hidden_subscriber_count => {
                    parse_count(s.subscriber_count.as_deref())
                }
                _ => 0,
            };
            let channel = ChannelStats {
                title: item.snippet.and_then(|s| s.title).unwrap_or_default(),
                subscriber_count,
            };
            Some((id, channel))
        })
        .collect()
}
