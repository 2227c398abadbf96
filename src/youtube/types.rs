use serde::Deserialize;

/// Envelope shared by `search.list`, `videos.list` and `channels.list`.
#[derive(Deserialize, Debug)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Deserialize, Debug)]
pub struct SearchItem {
    pub id: Option<SearchItemId>,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct VideoItem {
    pub id: Option<String>,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: Option<String>,
    pub title: Option<String>,
}

/// Counts are decimal strings on the wire; any of them may be missing
/// (e.g. likes hidden by the uploader).
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChannelItem {
    pub id: Option<String>,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Deserialize, Debug)]
pub struct ChannelSnippet {
    pub title: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub code: Option<u16>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorDetail {
    pub reason: Option<String>,
}

/// One ranked result of a keyword search, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub channel_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoStats {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: Option<String>,
    /// `videos.list` titles are plain text, unlike the HTML-escaped search snippet.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub title: String,
    pub subscriber_count: u64,
}
