//! Zero-filled contribution reports for the dashboard heatmap.

use crate::{date_key, date_keys_ending_at, ContributionStore, Result};
use chrono::{DateTime, Utc};
use folio_types::{ContributionDay, ContributionSummary, DailyContribution};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Range used when the caller gives nothing usable.
pub const DEFAULT_RANGE_DAYS: u32 = 365;
/// Upper clamp for the range, one leap year.
pub const MAX_RANGE_DAYS: u32 = 366;
const MIN_RANGE_DAYS: u32 = 1;

/// Clamp a requested range to `[1, 366]` days.
///
/// Absent, NaN, infinite and zero all fall back to 365. Fractions are floored.
/// This never fails.
pub fn normalize_range_days(raw: Option<f64>) -> u32 {
    match raw {
        Some(days) if days.is_finite() && days != 0.0 => {
            days.floor()
                .clamp(MIN_RANGE_DAYS as f64, MAX_RANGE_DAYS as f64) as u32
        }
        _ => DEFAULT_RANGE_DAYS,
    }
}

/// Read a range from untrusted text; anything non-numeric is treated as absent.
pub fn parse_range_days(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Inputs to [`SummaryReader::summary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    pub range_days: Option<f64>,
    /// End of the range. Defaults to the call-time instant.
    pub now: Option<DateTime<Utc>>,
}

/// Builds [`ContributionSummary`] reports from the contribution store.
#[derive(Clone)]
pub struct SummaryReader {
    store: Arc<dyn ContributionStore>,
}

impl SummaryReader {
    pub fn new(store: Arc<dyn ContributionStore>) -> Self {
        Self { store }
    }

    pub fn summary(&self, options: SummaryOptions) -> Result<ContributionSummary> {
        let range_days = normalize_range_days(options.range_days);
        let now = options.now.unwrap_or_else(Utc::now);

        let keys = date_keys_ending_at(now, range_days);
        let start_date = keys.first().cloned().unwrap_or_else(|| date_key(now));
        let end_date = keys.last().cloned().unwrap_or_else(|| date_key(now));
        let rows = self.store.contributions_between(&start_date, &end_date)?;

        debug!(
            target: "folio::contributions",
            "Summarizing {} days ({}..={}), {} stored rows",
            range_days,
            start_date,
            end_date,
            rows.len()
        );

        let by_date: HashMap<&str, &DailyContribution> =
            rows.iter().map(|row| (row.date.as_str(), row)).collect();

        let days: Vec<ContributionDay> = keys
            .into_iter()
            .map(|key| match by_date.get(key.as_str()) {
                Some(row) => ContributionDay::from(*row),
                None => ContributionDay::empty(key),
            })
            .collect();

        let total_updates: u64 = days.iter().map(|d| d.update_count as u64).sum();
        let total_chars: i64 = days.iter().map(|d| d.char_count).sum();
        let max_updates = days.iter().map(|d| d.update_count).fold(0, u32::max);
        let max_chars = days.iter().map(|d| d.char_count).fold(0, i64::max);
        let last_updated = rows.iter().map(|row| row.updated_at).max().unwrap_or(now);

        Ok(ContributionSummary {
            range_days,
            start_date,
            end_date,
            days,
            total_updates,
            total_chars,
            max_updates,
            max_chars,
            last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{utc, MemoryStore};
    use chrono::Duration;
    use proptest::prelude::*;

    fn row(date: &str, update_count: u32, char_delta: i64, updated_at: &str) -> DailyContribution {
        DailyContribution {
            date: date.to_string(),
            update_count,
            char_delta,
            updated_at: utc(updated_at),
        }
    }

    fn reader_with(rows: Vec<DailyContribution>) -> (SummaryReader, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_rows(rows));
        (SummaryReader::new(store.clone()), store)
    }

    #[test]
    fn test_three_day_scenario() {
        let (reader, store) = reader_with(vec![
            row("2025-11-10", 5, 500, "2025-11-10T09:00:00Z"),
            row("2025-11-11", 2, 200, "2025-11-11T08:00:00Z"),
        ]);

        let summary = reader
            .summary(SummaryOptions {
                range_days: Some(3.0),
                now: Some(utc("2025-11-11T12:00:00Z")),
            })
            .unwrap();

        assert_eq!(summary.start_date, "2025-11-09");
        assert_eq!(summary.end_date, "2025-11-11");
        assert_eq!(
            summary.days,
            vec![
                ContributionDay::empty("2025-11-09"),
                ContributionDay { date: "2025-11-10".into(), update_count: 5, char_count: 500 },
                ContributionDay { date: "2025-11-11".into(), update_count: 2, char_count: 200 },
            ]
        );
        assert_eq!(summary.total_updates, 7);
        assert_eq!(summary.total_chars, 700);
        assert_eq!(summary.max_updates, 5);
        assert_eq!(summary.max_chars, 500);
        assert_eq!(summary.last_updated, utc("2025-11-10T09:00:00Z"));
        assert_eq!(store.reads(), 1);
    }

    #[test]
    fn test_rows_outside_range_are_ignored() {
        let (reader, _store) = reader_with(vec![
            row("2025-11-01", 9, 900, "2025-11-01T00:00:00Z"),
            row("2025-11-12", 9, 900, "2025-11-12T00:00:00Z"),
            row("2025-11-11", 1, 10, "2025-11-11T00:00:00Z"),
        ]);

        let summary = reader
            .summary(SummaryOptions {
                range_days: Some(2.0),
                now: Some(utc("2025-11-11T12:00:00Z")),
            })
            .unwrap();

        assert_eq!(summary.total_updates, 1);
        assert_eq!(summary.total_chars, 10);
        assert_eq!(summary.last_updated, utc("2025-11-11T00:00:00Z"));
    }

    #[test]
    fn test_empty_store_zero_fills_and_uses_now() {
        let (reader, _store) = reader_with(vec![]);
        let before = Utc::now();
        let summary = reader
            .summary(SummaryOptions { range_days: Some(30.0), now: None })
            .unwrap();
        let after = Utc::now();

        assert_eq!(summary.days.len(), 30);
        assert!(summary.days.iter().all(|d| d.update_count == 0 && d.char_count == 0));
        assert_eq!(summary.total_updates, 0);
        assert_eq!(summary.max_chars, 0);
        assert!(summary.last_updated >= before && summary.last_updated <= after);
    }

    #[test]
    fn test_negative_days_do_not_push_max_below_zero() {
        let (reader, _store) = reader_with(vec![row("2025-11-11", 1, -40, "2025-11-11T00:00:00Z")]);
        let summary = reader
            .summary(SummaryOptions {
                range_days: Some(1.0),
                now: Some(utc("2025-11-11T12:00:00Z")),
            })
            .unwrap();

        assert_eq!(summary.total_chars, -40);
        assert_eq!(summary.max_chars, 0);
    }

    #[test]
    fn test_range_day_normalization() {
        assert_eq!(normalize_range_days(None), 365);
        assert_eq!(normalize_range_days(Some(0.0)), 365);
        assert_eq!(normalize_range_days(Some(f64::NAN)), 365);
        assert_eq!(normalize_range_days(Some(f64::INFINITY)), 365);
        assert_eq!(normalize_range_days(Some(1000.0)), 366);
        assert_eq!(normalize_range_days(Some(-7.0)), 1);
        assert_eq!(normalize_range_days(Some(0.5)), 1);
        assert_eq!(normalize_range_days(Some(90.9)), 90);
        assert_eq!(normalize_range_days(Some(366.0)), 366);
    }

    #[test]
    fn test_parse_range_days_is_lenient() {
        assert_eq!(parse_range_days(Some("90")), Some(90.0));
        assert_eq!(parse_range_days(Some(" 30 ")), Some(30.0));
        assert_eq!(parse_range_days(Some("abc")), None);
        assert_eq!(parse_range_days(Some("")), None);
        assert_eq!(parse_range_days(None), None);
    }

    #[test]
    fn test_bad_ranges_match_default_range() {
        let (reader, _store) = reader_with(vec![]);
        let now = Some(utc("2025-11-11T12:00:00Z"));
        let default = reader.summary(SummaryOptions { range_days: Some(365.0), now }).unwrap();

        for bad in [None, Some(0.0), Some(f64::NAN)] {
            let summary = reader.summary(SummaryOptions { range_days: bad, now }).unwrap();
            assert_eq!(summary, default);
        }

        let clamped = reader.summary(SummaryOptions { range_days: Some(1000.0), now }).unwrap();
        assert_eq!(clamped.range_days, 366);
        assert_eq!(clamped.days.len(), 366);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let (reader, _store) = reader_with(vec![row("2025-11-10", 5, 500, "2025-11-10T09:00:00Z")]);
        let options = SummaryOptions {
            range_days: Some(90.0),
            now: Some(utc("2025-11-11T12:00:00Z")),
        };
        assert_eq!(reader.summary(options).unwrap(), reader.summary(options).unwrap());
    }

    #[test]
    fn test_extreme_now_still_yields_full_range() {
        let (reader, _store) = reader_with(vec![]);

        for now in [DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC] {
            let summary = reader
                .summary(SummaryOptions { range_days: Some(366.0), now: Some(now) })
                .unwrap();
            assert_eq!(summary.days.len(), 366);
            assert_eq!(summary.days[0].date, summary.start_date);
            assert_eq!(summary.days[365].date, summary.end_date);
            assert!(summary.days.iter().all(|d| d.date.len() == 10));
            assert!(summary.start_date < summary.end_date);
        }

        let latest = reader
            .summary(SummaryOptions { range_days: Some(3.0), now: Some(DateTime::<Utc>::MAX_UTC) })
            .unwrap();
        assert_eq!(latest.end_date, "9999-12-31");
    }

    proptest! {
        #[test]
        fn prop_days_are_contiguous_and_ascending(
            range in 1u32..=366,
            secs in 0i64..4_102_444_800,
        ) {
            let (reader, _store) = reader_with(vec![]);
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            let summary = reader
                .summary(SummaryOptions { range_days: Some(range as f64), now: Some(now) })
                .unwrap();

            prop_assert_eq!(summary.days.len(), range as usize);
            prop_assert_eq!(&summary.days[0].date, &summary.start_date);
            prop_assert_eq!(&summary.days[summary.days.len() - 1].date, &summary.end_date);
            prop_assert_eq!(&summary.end_date, &date_key(now));

            for pair in summary.days.windows(2) {
                let a = chrono::NaiveDate::parse_from_str(&pair[0].date, "%Y-%m-%d").unwrap();
                let b = chrono::NaiveDate::parse_from_str(&pair[1].date, "%Y-%m-%d").unwrap();
                prop_assert_eq!(b - a, Duration::days(1));
            }
        }
    }
}
