//! Writing-activity tracking and article persistence for Folio.

mod article_store;
mod contribution_store;
mod date_key;
mod delta;
mod error;
mod headings;
mod recorder;
mod summary;
#[cfg(test)]
mod test_support;

pub use article_store::ArticleStore;
pub use contribution_store::{
    open_contribution_store, ContributionStore, SqliteContributionStore, WriteStrategy,
};
pub use date_key::{clamp_to_key_range, date_key, date_keys_ending_at, jst};
pub use delta::{count_japanese_chars, japanese_char_delta};
pub use error::FolioError;
pub use headings::{extract_headings, slugify};
pub use recorder::{ContributionRecorder, Recorded};
pub use summary::{
    normalize_range_days, parse_range_days, SummaryOptions, SummaryReader, DEFAULT_RANGE_DAYS,
    MAX_RANGE_DAYS,
};

/// Result type for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;
