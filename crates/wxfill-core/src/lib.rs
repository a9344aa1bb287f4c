//! Core data types, date ranges, and aggregation for the backfill pipeline
//!
//! This crate holds everything both binaries agree on: the payload shapes
//! exchanged over the channel, the calendar computation that drives a run,
//! message canonicalization, and the hourly-to-daily reduction.

pub mod dates;
pub mod normalize;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use dates::*;
pub use normalize::*;
pub use pipeline::*;
pub use summary::*;
pub use types::*;
