//! Keyed daily-summary store
//!
//! Rows are keyed by (two-digit month, compact date). Writing an existing
//! key overwrites the prior row, so re-running a year is safe.

pub mod sqlite;

pub use sqlite::*;

use chrono::{DateTime, Utc};
use thiserror::Error;
use wxfill_core::DailySummary;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("summary date {0:?} does not look like yyyy-mm-dd")]
    InvalidDate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted form of a daily summary
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    /// Two-digit month, e.g. "03"
    pub partition_key: String,

    /// Date with separators stripped, e.g. "20200305"
    pub row_key: String,

    /// RFC 3339 insertion timestamp
    pub inserted_at: String,

    pub avg_temp: Option<f64>,
    pub avg_wind_spd: Option<f64>,
    pub avg_dni: Option<f64>,
}

impl DailyRow {
    /// Derive the keyed row for a summary.
    pub fn from_summary(summary: &DailySummary, inserted_at: DateTime<Utc>) -> StoreResult<Self> {
        let partition_key = summary
            .date
            .get(5..7)
            .ok_or_else(|| StoreError::InvalidDate(summary.date.clone()))?
            .to_string();
        let row_key = summary.date.replace('-', "");
        if row_key.len() != 8 {
            return Err(StoreError::InvalidDate(summary.date.clone()));
        }

        Ok(Self {
            partition_key,
            row_key,
            inserted_at: inserted_at.to_rfc3339(),
            avg_temp: summary.avg_temp,
            avg_wind_spd: summary.avg_wind_spd,
            avg_dni: summary.avg_dni,
        })
    }
}
