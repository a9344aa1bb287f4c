//! Backfill producer
//!
//! Fetches a year of hourly weather history, one consecutive date pair at a
//! time, and publishes each payload onto the partitioned channel.

mod run;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use wxfill_channel::{UdpSender, PARTITION_COUNT};
use wxfill_config::AppConfig;
use wxfill_core::compute_dates;
use wxfill_provider::HistoryClient;

/// Publish one year of historical weather onto the channel
#[derive(Debug, Parser)]
#[command(name = "wxfill-producer", version, about)]
struct Cli {
    /// Target year; the current year backfills through yesterday
    year: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    wxfill_obs::init("wxfill-producer");

    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    let provider = config.provider()?;

    // Future years are rejected here, before any network activity.
    let dates = compute_dates(cli.year, Local::now().date_naive())?;
    if dates.len() < 2 {
        warn!(year = cli.year, "no complete day to backfill yet");
        return Ok(());
    }
    info!(year = cli.year, days = dates.len(), "date range computed");

    let client = HistoryClient::new(
        provider.api_url.clone(),
        provider.api_key.clone(),
        provider.latitude,
        provider.longitude,
    );

    let partitions = (0..PARTITION_COUNT)
        .map(|p| {
            let addr = config.partition_addr(p);
            addr.parse::<SocketAddr>()
                .with_context(|| format!("invalid channel address {addr}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut sender = UdpSender::connect(partitions)
        .await
        .context("failed to open channel sender")?;

    tokio::select! {
        report = run::publish_year(&client, &mut sender, &dates) => {
            let report = report?;
            info!(
                intervals = report.intervals,
                elapsed_s = report.elapsed.as_secs_f64(),
                "backfill published"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, aborting run");
        }
    }

    Ok(())
}
