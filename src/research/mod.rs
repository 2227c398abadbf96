//! Niche research pipeline: keyword fanout, batched enrichment, id-keyed join, filtering, and table assembly.

pub(crate) mod criteria;
pub(crate) mod engine;
mod join;
pub(crate) mod table;

pub use criteria::{FilterCriteria, ResearchConfig};
pub use engine::{ResearchReport, research};
pub use table::{SortKey, SortOrder};
