use crate::research::table::{SortKey, SortOrder};
use crate::youtube::MAX_PAGE_SIZE;

pub const DEFAULT_LIMIT: u8 = 20;
pub const MAX_CONCURRENCY: usize = 8;

/// Rejected before any request is made.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no keywords given")]
    NoKeywords,

    #[error("keyword #{index} is empty")]
    EmptyKeyword { index: usize },

    #[error("result limit must be between 1 and {max}, got {0}", max = MAX_PAGE_SIZE)]
    InvalidLimit(u8),

    #[error("concurrency must be between 1 and {max}, got {0}", max = MAX_CONCURRENCY)]
    InvalidConcurrency(usize),

    #[error("min {metric} ({min}) exceeds max {metric} ({max})")]
    InvertedBounds {
        metric: &'static str,
        min: u64,
        max: u64,
    },
}

/// Inclusive numeric bounds on subscriber and view counts. `None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub min_subscribers: Option<u64>,
    pub max_subscribers: Option<u64>,
    pub min_views: Option<u64>,
    pub max_views: Option<u64>,
}

impl FilterCriteria {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds("subscribers", self.min_subscribers, self.max_subscribers)?;
        check_bounds("views", self.min_views, self.max_views)
    }

    pub fn accepts(&self, subscribers: u64, views: u64) -> bool {
        within(subscribers, self.min_subscribers, self.max_subscribers)
            && within(views, self.min_views, self.max_views)
    }
}

fn check_bounds(
    metric: &'static str,
    min: Option<u64>,
    max: Option<u64>,
) -> Result<(), ConfigError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Err(ConfigError::InvertedBounds { metric, min, max })
        }
        _ => Ok(()),
    }
}

fn within(value: u64, min: Option<u64>, max: Option<u64>) -> bool {
    min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
}

/// Everything one research run needs besides the platform client.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub keywords: Vec<String>,
    pub limit: u8,
    pub criteria: FilterCriteria,
    /// `None` keeps discovery order.
    pub sort: Option<(SortKey, SortOrder)>,
    /// Keywords in flight at once. Output order does not depend on it.
    pub concurrency: usize,
}

impl ResearchConfig {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            limit: DEFAULT_LIMIT,
            criteria: FilterCriteria::default(),
            sort: Some((SortKey::Subscribers, SortOrder::Ascending)),
            concurrency: 1,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.is_empty() {
            return Err(ConfigError::NoKeywords);
        }
        if let Some(index) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ConfigError::EmptyKeyword { index: index + 1 });
        }
        if self.limit == 0 || self.limit > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidLimit(self.limit));
        }
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::InvalidConcurrency(self.concurrency));
        }
        self.criteria.validate()
    }
}
