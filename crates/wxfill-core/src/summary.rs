//! Hourly-to-daily aggregation

use thiserror::Error;

use crate::{DailySummary, IntervalPayload, Reading};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("payload contains no hourly records")]
    EmptyPayload,

    #[error("hourly timestamp {0:?} is too short to carry a date")]
    BadTimestamp(String),
}

/// Running arithmetic mean over the values actually present.
///
/// Placeholder and null readings are excluded rather than treated as zero;
/// a field missing from every record averages to `None`.
#[derive(Debug, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, reading: &Reading) {
        if let Some(v) = reading.as_f64() {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Reduce one interval's hourly records to a single daily summary.
///
/// The summary date comes from the first record's timestamp with the hour
/// component dropped. Means divide by the number of records present, so a
/// partial day still averages correctly.
pub fn aggregate(payload: &IntervalPayload) -> Result<DailySummary, AggregateError> {
    let first = payload.data.first().ok_or(AggregateError::EmptyPayload)?;
    let date = summary_date(&first.datetime)?;

    let mut temp = Mean::default();
    let mut wind_spd = Mean::default();
    let mut dni = Mean::default();
    for record in &payload.data {
        temp.add(&record.temp);
        wind_spd.add(&record.wind_spd);
        dni.add(&record.dni);
    }

    Ok(DailySummary {
        date,
        avg_temp: temp.finish(),
        avg_wind_spd: wind_spd.finish(),
        avg_dni: dni.finish(),
    })
}

/// Truncate an hourly timestamp (`yyyy-mm-dd:HH`) to its date component.
fn summary_date(datetime: &str) -> Result<String, AggregateError> {
    datetime
        .get(..10)
        .map(str::to_string)
        .ok_or_else(|| AggregateError::BadTimestamp(datetime.to_string()))
}
