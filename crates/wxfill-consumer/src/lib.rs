//! Drain-and-store pass over the channel partitions
//!
//! Each raw message is canonicalized, parsed, reduced to a daily summary,
//! and upserted into the keyed store. A bad message is logged and skipped;
//! it never stops the batch.

use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use wxfill_core::{aggregate, normalize_message, IntervalPayload, MessageStream, SummaryStore};

/// Counters for one partition drain, or a whole run via [`DrainStats::absorb`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainStats {
    pub received: usize,
    pub stored: usize,
    pub malformed: usize,
    pub store_failures: usize,
}

impl DrainStats {
    pub fn absorb(&mut self, other: DrainStats) {
        self.received += other.received;
        self.stored += other.stored;
        self.malformed += other.malformed;
        self.store_failures += other.store_failures;
    }
}

/// Drain one partition until it has been idle for `idle_timeout`.
///
/// A message that cannot be parsed or aggregated is counted as malformed and
/// skipped. A store failure is counted so the run can surface it in its exit
/// status, but the drain keeps going.
pub async fn drain_partition<M, S>(
    partition: u32,
    stream: &mut M,
    store: &mut S,
    idle_timeout: Duration,
) -> Result<DrainStats>
where
    M: MessageStream,
    S: SummaryStore,
{
    let mut stats = DrainStats::default();

    while let Some(raw) = stream.next_message(idle_timeout).await? {
        stats.received += 1;

        let canonical = normalize_message(&raw);
        let payload: IntervalPayload = match serde_json::from_str(&canonical) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(partition, error = %e, "malformed message skipped");
                stats.malformed += 1;
                continue;
            }
        };

        let summary = match aggregate(&payload) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(partition, error = %e, "payload could not be aggregated, skipped");
                stats.malformed += 1;
                continue;
            }
        };

        match store.upsert(&summary).await {
            Ok(()) => {
                stats.stored += 1;
                info!(
                    partition,
                    date = %summary.date,
                    avg_temp = summary.avg_temp,
                    avg_wind_spd = summary.avg_wind_spd,
                    avg_dni = summary.avg_dni,
                    "daily summary stored"
                );
            }
            Err(e) => {
                error!(partition, date = %summary.date, error = %e, "failed to store summary");
                stats.store_failures += 1;
            }
        }
    }

    info!(partition, received = stats.received, "partition drained");
    Ok(stats)
}
