//! SQLite persistence for daily contribution rows.

use crate::{FolioError, Result};
use chrono::{DateTime, Utc};
use folio_types::DailyContribution;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Storage contract shared by the recorder and the summary reader.
pub trait ContributionStore: Send + Sync {
    /// Rows with `start <= date <= end`, ascending by date.
    fn contributions_between(&self, start: &str, end: &str) -> Result<Vec<DailyContribution>>;

    /// Add one update and `char_delta` characters to the row for `date`,
    /// creating it if needed.
    fn upsert_contribution(&self, date: &str, char_delta: i64, at: DateTime<Utc>) -> Result<()>;
}

/// How writes reach the `daily_contributions` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Single `INSERT ... ON CONFLICT DO UPDATE` statement.
    #[default]
    NativeUpsert,
    /// Read, then plain `INSERT` or `UPDATE`. Concurrent writers on the same
    /// day can lose increments, and two first writes of a day can collide on
    /// the primary key.
    InsertOnly,
}

impl WriteStrategy {
    /// Pick a strategy from the client's reported upsert support.
    pub fn from_capability(upsert_supported: bool) -> Self {
        if upsert_supported {
            WriteStrategy::NativeUpsert
        } else {
            WriteStrategy::InsertOnly
        }
    }
}

/// Open the contribution store once at process start.
pub fn open_contribution_store(
    path: &Path,
    strategy: WriteStrategy,
) -> Result<Arc<dyn ContributionStore>> {
    let store = SqliteContributionStore::open(path, strategy)?;
    tracing::info!(
        target: "folio::contributions",
        "Opened contribution store at {:?} ({:?})",
        path,
        strategy
    );
    Ok(Arc::new(store))
}

/// SQLite-based contribution store.
pub struct SqliteContributionStore {
    conn: Mutex<Connection>,
    strategy: WriteStrategy,
}

impl SqliteContributionStore {
    /// Open or create the database at the given path.
    pub fn open(path: &Path, strategy: WriteStrategy) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            strategy,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS daily_contributions (
                date TEXT PRIMARY KEY,
                update_count INTEGER NOT NULL DEFAULT 0,
                char_delta INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn upsert_native(conn: &Connection, date: &str, char_delta: i64, at: &str) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO daily_contributions (date, update_count, char_delta, updated_at)
            VALUES (?1, 1, ?2, ?3)
            ON CONFLICT(date) DO UPDATE SET
                update_count = daily_contributions.update_count + 1,
                char_delta = daily_contributions.char_delta + excluded.char_delta,
                updated_at = excluded.updated_at
            "#,
            params![date, char_delta, at],
        )?;
        Ok(())
    }

    fn upsert_insert_only(conn: &Connection, date: &str, char_delta: i64, at: &str) -> Result<()> {
        let existing: Option<(i64, i64)> = conn
            .query_row(
                "SELECT update_count, char_delta FROM daily_contributions WHERE date = ?1",
                params![date],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match existing {
            None => {
                conn.execute(
                    r#"
                    INSERT INTO daily_contributions (date, update_count, char_delta, updated_at)
                    VALUES (?1, 1, ?2, ?3)
                    "#,
                    params![date, char_delta, at],
                )?;
            }
            Some((update_count, stored_delta)) => {
                conn.execute(
                    r#"
                    UPDATE daily_contributions SET
                        update_count = ?1,
                        char_delta = ?2,
                        updated_at = ?3
                    WHERE date = ?4
                    "#,
                    params![update_count + 1, stored_delta + char_delta, at, date],
                )?;
            }
        }
        Ok(())
    }
}

impl ContributionStore for SqliteContributionStore {
    fn contributions_between(&self, start: &str, end: &str) -> Result<Vec<DailyContribution>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT date, update_count, char_delta, updated_at
            FROM daily_contributions
            WHERE date >= ?1 AND date <= ?2
            ORDER BY date ASC
            "#,
        )?;
        let raw = stmt
            .query_map(params![start, end], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(date, update_count, char_delta, updated_at)| {
                let update_count = u32::try_from(update_count).map_err(|_| {
                    FolioError::InvalidStoredValue(format!(
                        "update_count {} for {}",
                        update_count, date
                    ))
                })?;
                Ok(DailyContribution {
                    date,
                    update_count,
                    char_delta,
                    updated_at: parse_timestamp(&updated_at)?,
                })
            })
            .collect()
    }

    fn upsert_contribution(&self, date: &str, char_delta: i64, at: DateTime<Utc>) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let at = at.to_rfc3339();
        match self.strategy {
            WriteStrategy::NativeUpsert => Self::upsert_native(&conn, date, char_delta, &at),
            WriteStrategy::InsertOnly => Self::upsert_insert_only(&conn, date, char_delta, &at),
        }
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FolioError::TimestampParse(format!("{value}: {e}")))
}
