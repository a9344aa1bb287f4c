//! Backfill consumer
//!
//! Drains both channel partitions once, aggregates each payload into a daily
//! summary, and upserts it into the keyed store. Exits non-zero if any
//! summary failed to store.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::info;

use wxfill_channel::{UdpReceiver, PARTITION_COUNT};
use wxfill_config::AppConfig;
use wxfill_consumer::{drain_partition, DrainStats};
use wxfill_store::SqliteStore;

/// Idle window that ends a partition drain; a steady trickle of messages
/// keeps it open.
const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    wxfill_obs::init("wxfill-consumer");

    let config = AppConfig::load().context("failed to load configuration")?;
    let store_path = config.store_path();
    let mut store = SqliteStore::open(&store_path)
        .with_context(|| format!("failed to open store at {store_path}"))?;

    let started = Instant::now();
    let mut totals = DrainStats::default();

    for partition in 0..PARTITION_COUNT {
        let addr = config.partition_addr(partition);
        let addr = addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid channel address {addr}"))?;
        let mut receiver = UdpReceiver::bind(addr, partition)
            .await
            .with_context(|| format!("failed to bind partition {partition}"))?;

        tokio::select! {
            stats = drain_partition(partition, &mut receiver, &mut store, IDLE_TIMEOUT) => {
                totals.absorb(stats?);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, stopping drain");
                break;
            }
        }
    }

    info!(
        received = totals.received,
        stored = totals.stored,
        malformed = totals.malformed,
        elapsed_s = started.elapsed().as_secs_f64(),
        "drain pass complete"
    );

    if totals.store_failures > 0 {
        bail!(
            "{} daily summaries failed to store",
            totals.store_failures
        );
    }

    Ok(())
}
