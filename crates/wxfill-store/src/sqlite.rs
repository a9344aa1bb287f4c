//! SQLite-backed keyed store

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use wxfill_core::{DailySummary, SummaryStore};

use crate::{DailyRow, StoreResult};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS daily_summary (
                partition_key TEXT NOT NULL,
                row_key TEXT NOT NULL,
                inserted_at TEXT NOT NULL,
                avg_temp REAL,
                avg_wind_spd REAL,
                avg_dni REAL,
                PRIMARY KEY (partition_key, row_key)
            );",
        )?;
        Ok(Self { conn })
    }

    /// Write one row; an existing (partition_key, row_key) pair is
    /// overwritten, it never errors.
    pub fn upsert(&mut self, row: &DailyRow) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO daily_summary
                 (partition_key, row_key, inserted_at, avg_temp, avg_wind_spd, avg_dni)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(partition_key, row_key) DO UPDATE SET
                 inserted_at = excluded.inserted_at,
                 avg_temp = excluded.avg_temp,
                 avg_wind_spd = excluded.avg_wind_spd,
                 avg_dni = excluded.avg_dni",
            params![
                row.partition_key,
                row.row_key,
                row.inserted_at,
                row.avg_temp,
                row.avg_wind_spd,
                row.avg_dni
            ],
        )?;
        debug!(partition_key = %row.partition_key, row_key = %row.row_key, "daily summary stored");
        Ok(())
    }

    /// Fetch one row by key.
    pub fn get(&self, partition_key: &str, row_key: &str) -> StoreResult<Option<DailyRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT partition_key, row_key, inserted_at, avg_temp, avg_wind_spd, avg_dni
                 FROM daily_summary
                 WHERE partition_key = ?1 AND row_key = ?2",
                params![partition_key, row_key],
                |r| {
                    Ok(DailyRow {
                        partition_key: r.get(0)?,
                        row_key: r.get(1)?,
                        inserted_at: r.get(2)?,
                        avg_temp: r.get(3)?,
                        avg_wind_spd: r.get(4)?,
                        avg_dni: r.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn count(&self) -> StoreResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM daily_summary", [], |r| r.get(0))?;
        Ok(count)
    }
}

// rusqlite's Connection is Send but not Sync; the drain pass owns the store
// exclusively, which keeps per-key upserts atomic.
#[async_trait::async_trait]
impl SummaryStore for SqliteStore {
    async fn upsert(&mut self, summary: &DailySummary) -> anyhow::Result<()> {
        let row = DailyRow::from_summary(summary, Utc::now())?;
        SqliteStore::upsert(self, &row)?;
        Ok(())
    }
}
