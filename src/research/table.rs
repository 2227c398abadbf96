use std::collections::HashSet;

/// Output column names, in presentation order.
pub const COLUMNS: [&str; 11] = [
    "Keyword",
    "Title",
    "Description",
    "URL",
    "Views",
    "Subscribers",
    "Likes",
    "Comments",
    "Publish Date",
    "Channel Name",
    "Channel URL",
];

pub const DESCRIPTION_DISPLAY_CHARS: usize = 150;

/// One joined, filter-passing video. Identity is its position in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub keyword: String,
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub channel_id: String,
    pub channel_name: String,
    pub subscribers: u64,
}

impl ResultRow {
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn channel_url(&self) -> String {
        format!("https://www.youtube.com/channel/{}", self.channel_id)
    }

    /// `YYYY-MM-DD` part of the RFC 3339 publish timestamp.
    pub fn publish_date(&self) -> &str {
        self.published_at
            .get(..10)
            .unwrap_or(self.published_at.as_str())
    }

    pub fn display_description(&self) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(DESCRIPTION_DISPLAY_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head.trim_end())
        } else {
            head
        }
    }

    /// Cell values aligned with `COLUMNS`.
    pub fn cells(&self) -> [String; 11] {
        [
            self.keyword.clone(),
            self.title.clone(),
            self.display_description(),
            self.url(),
            self.views.to_string(),
            self.subscribers.to_string(),
            self.likes.to_string(),
            self.comments.to_string(),
            self.publish_date().to_string(),
            self.channel_name.clone(),
            self.channel_url(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Subscribers,
    Views,
    Likes,
    Comments,
}

impl SortKey {
    fn value(self, row: &ResultRow) -> u64 {
        match self {
            SortKey::Subscribers => row.subscribers,
            SortKey::Views => row.views,
            SortKey::Likes => row.likes,
            SortKey::Comments => row.comments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordered result set with a fixed column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable: rows with equal keys keep their relative order in both directions.
    pub fn sort_by(&mut self, key: SortKey, order: SortOrder) {
        self.rows.sort_by(|a, b| {
            let ord = key.value(a).cmp(&key.value(b));
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    /// Distinct keywords present in the table, in first-appearance order.
    pub fn keywords(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.keyword.as_str())
            .filter(|k| seen.insert(*k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(keyword: &str, video_id: &str, subscribers: u64, views: u64) -> ResultRow {
        ResultRow {
            keyword: keyword.into(),
            video_id: video_id.into(),
            title: format!("Title {video_id}"),
            description: String::new(),
            published_at: "2024-05-01T12:00:00Z".into(),
            views,
            likes: 0,
            comments: 0,
            channel_id: format!("C-{video_id}"),
            channel_name: "Channel".into(),
            subscribers,
        }
    }

    fn ids(table: &ResultTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.video_id.as_str()).collect()
    }

    #[test]
    fn empty_table_is_valid() {
        let mut table = ResultTable::new(vec![]);
        table.sort_by(SortKey::Subscribers, SortOrder::Ascending);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.keywords().is_empty());
        assert_eq!(table.columns().len(), 11);
    }

    #[test]
    fn ascending_sort_is_stable() {
        let mut table = ResultTable::new(vec![
            row("k", "A", 500, 1),
            row("k", "B", 100, 2),
            row("k", "C", 500, 3),
            row("k", "D", 100, 4),
        ]);
        table.sort_by(SortKey::Subscribers, SortOrder::Ascending);
        assert_eq!(ids(&table), ["B", "D", "A", "C"]);
    }

    #[test]
    fn descending_sort_keeps_ties_in_input_order() {
        let mut table = ResultTable::new(vec![
            row("k", "A", 0, 10),
            row("k", "B", 0, 30),
            row("k", "C", 0, 10),
        ]);
        table.sort_by(SortKey::Views, SortOrder::Descending);
        assert_eq!(ids(&table), ["B", "A", "C"]);
    }

    #[test]
    fn keywords_are_distinct_in_order() {
        let table = ResultTable::new(vec![
            row("fitness tips", "A", 1, 1),
            row("pet care", "B", 1, 1),
            row("fitness tips", "C", 1, 1),
        ]);
        assert_eq!(table.keywords(), ["fitness tips", "pet care"]);
    }

    #[test]
    fn cells_follow_column_order() {
        let mut r = row("pet care", "V1", 500, 50_000);
        r.likes = 7;
        r.comments = 3;
        r.channel_id = "C1".into();
        let cells = r.cells();
        assert_eq!(cells[0], "pet care");
        assert_eq!(cells[3], "https://www.youtube.com/watch?v=V1");
        assert_eq!(cells[4], "50000");
        assert_eq!(cells[5], "500");
        assert_eq!(cells[6], "7");
        assert_eq!(cells[7], "3");
        assert_eq!(cells[8], "2024-05-01");
        assert_eq!(cells[10], "https://www.youtube.com/channel/C1");
    }

    #[test]
    fn long_descriptions_are_truncated_on_char_boundary() {
        let mut r = row("k", "V", 0, 0);
        r.description = "é".repeat(DESCRIPTION_DISPLAY_CHARS + 20);
        let shown = r.display_description();
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), DESCRIPTION_DISPLAY_CHARS + 3);

        r.description = "short".into();
        assert_eq!(r.display_description(), "short");
    }

    #[test]
    fn publish_date_tolerates_short_timestamps() {
        let mut r = row("k", "V", 0, 0);
        r.published_at = String::new();
        assert_eq!(r.publish_date(), "");
    }
}
