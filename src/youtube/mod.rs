//! YouTube Data API v3 client: keyword search and batched statistics lookups.

pub mod extract;
pub mod types;

use std::collections::HashMap;
use std::env;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use extract::{extract_channel_stats, extract_hits, extract_video_stats};
use types::{
    ApiError, ChannelItem, ChannelStats, ErrorResponse, ListResponse, SearchHit, SearchItem,
    VideoItem, VideoStats,
};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Largest `maxResults` accepted by `search.list`.
pub const MAX_PAGE_SIZE: u8 = 50;
/// Largest number of ids accepted by a single `videos.list` / `channels.list` call.
pub const MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum YouTubeError {
    #[error("YOUTUBE_API_KEY not set. Create one at https://console.cloud.google.com/apis/credentials")]
    ApiKeyNotSet,

    #[error("API key rejected: {0}")]
    ApiKeyInvalid(String),

    #[error("YouTube API rate limit exceeded")]
    RateLimited,

    #[error("YouTube API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("YouTube API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// The three upstream operations the research pipeline depends on.
/// Implemented by `YouTubeClient` for production; mock implementations used in tests.
pub trait VideoPlatform {
    /// First page of video results for `keyword`, in rank order.
    async fn search(&self, keyword: &str, limit: u8) -> Result<Vec<SearchHit>, YouTubeError>;

    /// Statistics for at most `MAX_BATCH_SIZE` video ids, keyed by id.
    async fn video_stats(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, VideoStats>, YouTubeError>;

    /// Statistics for at most `MAX_BATCH_SIZE` channel ids, keyed by id.
    async fn channel_stats(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, ChannelStats>, YouTubeError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// HTTP client for the YouTube Data API.
///
/// The key is read from `YOUTUBE_API_KEY` and sent as the `x-goog-api-key`
/// header so it never appears in request URLs or logs.
#[derive(Clone, Debug)]
pub struct YouTubeClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl YouTubeClient {
    pub fn from_env(http: Client) -> Result<Self, YouTubeError> {
        Self::from_key(http, env::var("YOUTUBE_API_KEY").ok())
    }

    /// Missing and blank keys are both `ApiKeyNotSet`.
    fn from_key(http: Client, api_key: Option<String>) -> Result<Self, YouTubeError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(YouTubeError::ApiKeyNotSet)?;
        Ok(Self {
            http,
            api_key: ApiKey(api_key),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            base_url: base_url.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
        url.query_pairs_mut().extend_pairs(params);

        debug_assert!(
            url.scheme() == "https" || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .get(url)
            .header("x-goog-api-key", &self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        if let Ok(body) = serde_json::from_str::<ErrorResponse>(&text)
            && let Some(err) = &body.error
        {
            let classified = classify_api_error(err, status.as_u16());
            warn!(path, error = %classified, "YouTube API error");
            return Err(classified);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(path, "YouTube API rate limited");
            return Err(YouTubeError::RateLimited);
        }

        let snippet: String = text.chars().take(200).collect();
        warn!(path, status = %status, "YouTube API error (no structured body)");
        Err(YouTubeError::Api {
            code: status.as_u16(),
            message: format!("HTTP {status}: {snippet}"),
        })
    }
}

impl VideoPlatform for YouTubeClient {
    async fn search(&self, keyword: &str, limit: u8) -> Result<Vec<SearchHit>, YouTubeError> {
        let max_results = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        let response: ListResponse<SearchItem> = self
            .get_json(
                "/search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("q", keyword),
                    ("maxResults", &max_results),
                ],
            )
            .await?;
        let hits = extract_hits(response);
        debug!(keyword, hits = hits.len(), "search complete");
        Ok(hits)
    }

    async fn video_stats(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, VideoStats>, YouTubeError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let joined = ids.join(",");
        let response: ListResponse<VideoItem> = self
            .get_json("/videos", &[("part", "snippet,statistics"), ("id", &joined)])
            .await?;
        let stats = extract_video_stats(response);
        debug!(requested = ids.len(), returned = stats.len(), "video stats fetched");
        Ok(stats)
    }

    async fn channel_stats(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, ChannelStats>, YouTubeError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let joined = ids.join(",");
        let response: ListResponse<ChannelItem> = self
            .get_json("/channels", &[("part", "snippet,statistics"), ("id", &joined)])
            .await?;
        let stats = extract_channel_stats(response);
        debug!(requested = ids.len(), returned = stats.len(), "channel stats fetched");
        Ok(stats)
    }
}

fn classify_api_error(err: &ApiError, http_status: u16) -> YouTubeError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());
    let reason = err.errors.iter().find_map(|d| d.reason.as_deref());

    match (err.code.unwrap_or(http_status), reason) {
        (_, Some("quotaExceeded" | "dailyLimitExceeded")) => YouTubeError::QuotaExhausted(message),
        (_, Some("rateLimitExceeded" | "userRateLimitExceeded")) | (429, _) => {
            YouTubeError::RateLimited
        }
        (_, Some("keyInvalid" | "keyExpired")) => YouTubeError::ApiKeyInvalid(message),
        (403, _) => YouTubeError::Forbidden(message),
        (code, _) => YouTubeError::Api { code, message },
    }
}
