//! Daily writing-activity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted day of writing activity, keyed by its JST date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyContribution {
    /// Calendar day in `YYYY-MM-DD` form.
    pub date: String,
    /// Number of article saves that day.
    pub update_count: u32,
    /// Net change in Japanese character count. May be negative.
    pub char_delta: i64,
    /// Last write to this row.
    pub updated_at: DateTime<Utc>,
}

/// A single day in a summary. Days without a stored row are zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: String,
    pub update_count: u32,
    pub char_count: i64,
}

impl ContributionDay {
    /// A placeholder entry for a day with no activity.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            update_count: 0,
            char_count: 0,
        }
    }
}

impl From<&DailyContribution> for ContributionDay {
    fn from(row: &DailyContribution) -> Self {
        Self {
            date: row.date.clone(),
            update_count: row.update_count,
            char_count: row.char_delta,
        }
    }
}

/// Zero-filled activity report over a contiguous range of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    /// Number of entries in `days`.
    pub range_days: u32,
    pub start_date: String,
    pub end_date: String,
    /// Oldest first, one entry per day, no gaps.
    pub days: Vec<ContributionDay>,
    pub total_updates: u64,
    pub total_chars: i64,
    pub max_updates: u32,
    pub max_chars: i64,
    /// Latest `updated_at` among stored rows in range, or the request time.
    pub last_updated: DateTime<Utc>,
}
