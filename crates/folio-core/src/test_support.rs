//! In-memory contribution store for unit tests.

use crate::{ContributionStore, Result};
use chrono::{DateTime, Utc};
use folio_types::DailyContribution;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<String, DailyContribution>>,
    writes: AtomicUsize,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn with_rows(rows: impl IntoIterator<Item = DailyContribution>) -> Self {
        let store = Self::default();
        {
            let mut map = store.rows.lock().unwrap();
            for row in rows {
                map.insert(row.date.clone(), row);
            }
        }
        store
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn row(&self, date: &str) -> Option<DailyContribution> {
        self.rows.lock().unwrap().get(date).cloned()
    }
}

impl ContributionStore for MemoryStore {
    fn contributions_between(&self, start: &str, end: &str) -> Result<Vec<DailyContribution>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .range(start.to_string()..=end.to_string())
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn upsert_contribution(&self, date: &str, char_delta: i64, at: DateTime<Utc>) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows.entry(date.to_string()).or_insert_with(|| DailyContribution {
            date: date.to_string(),
            update_count: 0,
            char_delta: 0,
            updated_at: at,
        });
        row.update_count += 1;
        row.char_delta += char_delta;
        row.updated_at = at;
        Ok(())
    }
}

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}
