use std::collections::HashMap;

use tracing::debug;

use super::criteria::FilterCriteria;
use super::table::ResultRow;
use crate::youtube::types::{ChannelStats, SearchHit, VideoStats};

/// Pair each hit with its enrichment entries by id and keep the pairs that pass `criteria`.
///
/// Output follows hit order. The maps may have been filled in any order or be
/// incomplete: a hit whose video or channel has no entry is dropped, never
/// padded with zeros.
pub fn join_hits(
    keyword: &str,
    hits: &[SearchHit],
    videos: &HashMap<String, VideoStats>,
    channels: &HashMap<String, ChannelStats>,
    criteria: &FilterCriteria,
) -> Vec<ResultRow> {
    let mut unmatched = 0usize;
    let rows: Vec<ResultRow> = hits
        .iter()
        .filter_map(|hit| {
            let (Some(video), Some(channel)) =
                (videos.get(&hit.video_id), channels.get(&hit.channel_id))
            else {
                unmatched += 1;
                return None;
            };
            criteria
                .accepts(channel.subscriber_count, video.view_count)
                .then(|| build_row(keyword, hit, video, channel))
        })
        .collect();

    if unmatched > 0 {
        debug!(keyword, unmatched, "hits without enrichment dropped");
    }
    rows
}

fn build_row(
    keyword: &str,
    hit: &SearchHit,
    video: &VideoStats,
    channel: &ChannelStats,
) -> ResultRow {
    let channel_name = if channel.title.is_empty() {
        hit.channel_title.clone()
    } else {
        channel.title.clone()
    };
    ResultRow {
        keyword: keyword.to_string(),
        video_id: hit.video_id.clone(),
        title: video.title.clone().unwrap_or_else(|| hit.title.clone()),
        description: hit.description.clone(),
        published_at: video
            .published_at
            .clone()
            .unwrap_or_else(|| hit.published_at.clone()),
        views: video.view_count,
        likes: video.like_count,
        comments: video.comment_count,
        channel_id: hit.channel_id.clone(),
        channel_name,
        subscribers: channel.subscriber_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(video_id: &str, channel_id: &str) -> SearchHit {
        SearchHit {
            video_id: video_id.into(),
            channel_id: channel_id.into(),
            title: format!("search title {video_id}"),
            description: "desc".into(),
            published_at: "2024-01-01T00:00:00Z".into(),
            channel_title: format!("search channel {channel_id}"),
        }
    }

    fn videos(entries: &[(&str, u64)]) -> HashMap<String, VideoStats> {
        entries
            .iter()
            .map(|(id, views)| {
                (
                    id.to_string(),
                    VideoStats {
                        view_count: *views,
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    fn channels(entries: &[(&str, u64)]) -> HashMap<String, ChannelStats> {
        entries
            .iter()
            .map(|(id, subs)| {
                (
                    id.to_string(),
                    ChannelStats {
                        title: format!("channel {id}"),
                        subscriber_count: *subs,
                    },
                )
            })
            .collect()
    }

    fn niche() -> FilterCriteria {
        FilterCriteria {
            min_views: Some(10_000),
            max_subscribers: Some(1000),
            ..Default::default()
        }
    }

    #[test]
    fn small_channel_with_many_views_passes() {
        let rows = join_hits(
            "pet care",
            &[hit("V1", "C1")],
            &videos(&[("V1", 50_000)]),
            &channels(&[("C1", 500)]),
            &niche(),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].keyword, "pet care");
        assert_eq!(rows[0].video_id, "V1");
        assert_eq!(rows[0].views, 50_000);
        assert_eq!(rows[0].subscribers, 500);
        assert_eq!(rows[0].channel_name, "channel C1");
    }

    #[test]
    fn channel_over_max_subscribers_is_filtered() {
        let rows = join_hits(
            "pet care",
            &[hit("V1", "C1")],
            &videos(&[("V1", 50_000)]),
            &channels(&[("C1", 5000)]),
            &niche(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn joins_by_id_not_position() {
        let hits = [hit("V1", "C1"), hit("V2", "C2"), hit("V3", "C3")];
        // Channel C2 missing and entries listed out of order.
        let rows = join_hits(
            "k",
            &hits,
            &videos(&[("V3", 30), ("V1", 10), ("V2", 20)]),
            &channels(&[("C3", 3), ("C1", 1)]),
            &FilterCriteria::default(),
        );
        let pairs: Vec<_> = rows
            .iter()
            .map(|r| (r.video_id.as_str(), r.views, r.subscribers))
            .collect();
        assert_eq!(pairs, [("V1", 10, 1), ("V3", 30, 3)]);
    }

    #[test]
    fn missing_video_entry_is_dropped() {
        let rows = join_hits(
            "k",
            &[hit("V1", "C1"), hit("V2", "C1")],
            &videos(&[("V2", 0)]),
            &channels(&[("C1", 0)]),
            &FilterCriteria::default(),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].video_id, "V2");
    }

    #[test]
    fn boundary_values_pass() {
        let criteria = FilterCriteria {
            min_subscribers: Some(1000),
            max_subscribers: Some(1000),
            min_views: Some(1000),
            max_views: Some(1000),
        };
        let rows = join_hits(
            "k",
            &[hit("V1", "C1")],
            &videos(&[("V1", 1000)]),
            &channels(&[("C1", 1000)]),
            &criteria,
        );
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn shared_channel_serves_several_hits() {
        let rows = join_hits(
            "k",
            &[hit("V1", "C1"), hit("V2", "C1")],
            &videos(&[("V1", 1), ("V2", 2)]),
            &channels(&[("C1", 9)]),
            &FilterCriteria::default(),
        );
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.subscribers == 9));
    }

    #[test]
    fn enrichment_fields_take_precedence_over_snippet() {
        let mut vids = videos(&[("V1", 1)]);
        vids.get_mut("V1").unwrap().title = Some("Cats & Dogs".into());
        vids.get_mut("V1").unwrap().published_at = Some("2025-02-03T04:05:06Z".into());
        let mut chans = channels(&[("C1", 1)]);
        chans.get_mut("C1").unwrap().title = String::new();

        let rows = join_hits(
            "k",
            &[hit("V1", "C1")],
            &vids,
            &chans,
            &FilterCriteria::default(),
        );
        assert_eq!(rows[0].title, "Cats & Dogs");
        assert_eq!(rows[0].published_at, "2025-02-03T04:05:06Z");
        assert_eq!(rows[0].channel_name, "search channel C1");
    }
}
