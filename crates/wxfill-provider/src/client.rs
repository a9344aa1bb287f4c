//! Hourly-history API client

use reqwest::Client;
use tracing::debug;
use wxfill_core::{DateInterval, IntervalSource, RawPayload};

use crate::{ProviderError, ProviderResult};

/// Client for the provider's hourly-history endpoint. Location and
/// credentials are injected at construction; the client never reads
/// configuration itself.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    http: Client,
    api_url: String,
    api_key: String,
    latitude: f64,
    longitude: f64,
}

impl HistoryClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            latitude,
            longitude,
        }
    }

    /// Fetch the raw hourly payload for one consecutive date pair.
    pub async fn fetch_interval(&self, interval: &DateInterval) -> ProviderResult<RawPayload> {
        let res = self
            .http
            .get(&self.api_url)
            .query(&[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
                ("start_date", interval.start.format("%Y-%m-%d").to_string()),
                ("end_date", interval.end.format("%Y-%m-%d").to_string()),
                ("tz", "local".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                interval: *interval,
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.map_err(|source| ProviderError::Request {
                interval: *interval,
                source,
            })?;
            return Err(ProviderError::Status {
                interval: *interval,
                status,
                body: truncate_body(&body),
            });
        }

        let payload = res
            .json::<RawPayload>()
            .await
            .map_err(|source| ProviderError::Decode {
                interval: *interval,
                source,
            })?;

        debug!(interval = %interval, "interval fetched");
        Ok(payload)
    }
}

#[async_trait::async_trait]
impl IntervalSource for HistoryClient {
    async fn fetch(&self, interval: &DateInterval) -> anyhow::Result<RawPayload> {
        Ok(self.fetch_interval(interval).await?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}
