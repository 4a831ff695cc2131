//! Records article saves into the daily contribution table.

use crate::{date_key, japanese_char_delta, ContributionStore, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// What a successful recording wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub date: String,
    pub char_delta: i64,
}

/// Turns text revisions into daily contribution increments.
#[derive(Clone)]
pub struct ContributionRecorder {
    store: Arc<dyn ContributionStore>,
}

impl ContributionRecorder {
    pub fn new(store: Arc<dyn ContributionStore>) -> Self {
        Self { store }
    }

    /// Record one save of `next` replacing `previous`.
    ///
    /// An absent or blank `next` writes nothing and returns `Ok(None)`.
    /// The day is taken from `event_date` (default now) in JST.
    pub fn record(
        &self,
        previous: Option<&str>,
        next: Option<&str>,
        event_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Recorded>> {
        let Some(next) = next.filter(|text| !text.trim().is_empty()) else {
            debug!(target: "folio::contributions", "Nothing to record, skipping");
            return Ok(None);
        };

        let now = Utc::now();
        let char_delta = japanese_char_delta(previous, next);
        let date = date_key(event_date.unwrap_or(now));

        self.store.upsert_contribution(&date, char_delta, now)?;
        debug!(
            target: "folio::contributions",
            "Recorded contribution for {} (delta {})",
            date,
            char_delta
        );

        Ok(Some(Recorded { date, char_delta }))
    }
}
