//! REST client for the historical weather provider
//!
//! One outbound call per consecutive date pair; no retry logic lives here.
//! Every failure carries the interval it belongs to so a dropped day is
//! never silent.

pub mod client;

pub use client::*;

use thiserror::Error;
use wxfill_core::DateInterval;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("history request for {interval} failed: {source}")]
    Request {
        interval: DateInterval,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned {status} for {interval}: {body}")]
    Status {
        interval: DateInterval,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("provider response for {interval} was not valid JSON: {source}")]
    Decode {
        interval: DateInterval,
        #[source]
        source: reqwest::Error,
    },
}

pub type ProviderResult<T> = Result<T, ProviderError>;
