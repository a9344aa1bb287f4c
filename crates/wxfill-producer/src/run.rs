//! Fetch-and-publish loop

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use wxfill_channel::partition_for;
use wxfill_core::{consecutive_intervals, IntervalSource, MessageSink};

/// Outcome of one producer run
#[derive(Debug)]
pub struct RunReport {
    pub intervals: usize,
    pub elapsed: Duration,
}

/// Fetch every consecutive date pair and publish each payload to its
/// round-robin partition.
///
/// Any fetch or publish failure aborts the whole run: a dropped day must be
/// visible, never silent.
pub async fn publish_year<S, K>(source: &S, sink: &mut K, dates: &[NaiveDate]) -> Result<RunReport>
where
    S: IntervalSource,
    K: MessageSink,
{
    let started = Instant::now();
    let intervals = consecutive_intervals(dates);

    for (index, interval) in intervals.iter().enumerate() {
        let payload = source
            .fetch(interval)
            .await
            .with_context(|| format!("fetch failed for interval {interval}"))?;
        let message = serde_json::to_string(&payload)
            .with_context(|| format!("payload for {interval} is not serializable"))?;

        let partition = partition_for(index);
        sink.send(partition, &message).await.with_context(|| {
            format!("publish failed for interval {interval} on partition {partition}")
        })?;

        debug!(index, partition, interval = %interval, "interval published");
    }

    info!(count = intervals.len(), "all intervals published");
    Ok(RunReport {
        intervals: intervals.len(),
        elapsed: started.elapsed(),
    })
}
