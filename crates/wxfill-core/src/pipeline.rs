use std::time::Duration;

use anyhow::Result;

use crate::{DailySummary, DateInterval, RawPayload};

#[async_trait::async_trait]
pub trait IntervalSource: Send + Sync {
    async fn fetch(&self, interval: &DateInterval) -> Result<RawPayload>;
}

#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&mut self, partition: u32, message: &str) -> Result<()>;
}

#[async_trait::async_trait]
pub trait MessageStream: Send + Sync {
    /// Next raw message, or `None` once the stream has been idle for
    /// `idle_timeout`. The timeout bounds the gap between messages, not the
    /// total drain time.
    async fn next_message(&mut self, idle_timeout: Duration) -> Result<Option<String>>;
}

#[async_trait::async_trait]
pub trait SummaryStore: Send {
    async fn upsert(&mut self, summary: &DailySummary) -> Result<()>;
}
