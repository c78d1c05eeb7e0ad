//! SQLite cache for raw hourly samples
//!
//! The pipeline writes each fetched day with merge semantics (re-fetching a
//! day overwrites matching hours, keyed by day+hour) and reads a whole day
//! back before aggregation. The core crate never touches this store.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use dresscast_core::HourlySample;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS hourly_samples (
    day TEXT NOT NULL,
    hour INTEGER NOT NULL,
    temperature_c REAL NOT NULL,
    apparent_temperature_c REAL NOT NULL,
    precipitation_mm REAL NOT NULL,
    wind_speed_kmh REAL NOT NULL,
    fetched_at TEXT NOT NULL,
    PRIMARY KEY (day, hour)
);";

/// Embedded store for fetched samples
pub struct SampleStore {
    conn: Connection,
}

impl SampleStore {
    /// Open (or create) the store at `path` and ensure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests and dry runs
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert or update a batch of samples in one transaction
    ///
    /// Conflicting (day, hour) rows are overwritten with the fresh values,
    /// so a later fetch of the same day supersedes an earlier one.
    #[instrument(skip(self, samples))]
    pub fn upsert_samples(&mut self, samples: &[HourlySample]) -> StoreResult<usize> {
        let fetched_at = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO hourly_samples
                    (day, hour, temperature_c, apparent_temperature_c,
                     precipitation_mm, wind_speed_kmh, fetched_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT (day, hour) DO UPDATE SET
                    temperature_c = excluded.temperature_c,
                    apparent_temperature_c = excluded.apparent_temperature_c,
                    precipitation_mm = excluded.precipitation_mm,
                    wind_speed_kmh = excluded.wind_speed_kmh,
                    fetched_at = excluded.fetched_at",
            )?;
            for sample in samples {
                stmt.execute(params![
                    sample.date.format("%Y-%m-%d").to_string(),
                    i64::from(sample.hour),
                    sample.temperature_c,
                    sample.apparent_temperature_c,
                    sample.precipitation_mm,
                    sample.wind_speed_kmh,
                    fetched_at,
                ])?;
            }
        }
        tx.commit()?;

        debug!(count = samples.len(), "upserted samples");
        Ok(samples.len())
    }

    /// Load all cached samples for one day, ordered by hour
    #[instrument(skip(self))]
    pub fn load_day(&self, date: NaiveDate) -> StoreResult<Vec<HourlySample>> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT hour, temperature_c, apparent_temperature_c,
                    precipitation_mm, wind_speed_kmh
             FROM hourly_samples WHERE day = ?1 ORDER BY hour",
        )?;
        let rows = stmt.query_map(params![day], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
            ))
        })?;

        let mut samples = Vec::new();
        for row in rows {
            let (hour, temperature_c, apparent_temperature_c, precipitation_mm, wind_speed_kmh) =
                row?;
            let Ok(hour) = u8::try_from(hour) else {
                warn!(hour, %day, "skipping row with out-of-range hour");
                continue;
            };
            samples.push(HourlySample {
                date,
                hour,
                temperature_c,
                apparent_temperature_c,
                precipitation_mm,
                wind_speed_kmh,
            });
        }
        Ok(samples)
    }

    /// Number of cached samples for one day
    #[instrument(skip(self))]
    pub fn count_day(&self, date: NaiveDate) -> StoreResult<i64> {
        let day = date.format("%Y-%m-%d").to_string();
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM hourly_samples WHERE day = ?1",
            params![day],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
