//! Two-partition message channel
//!
//! The producer and consumer processes share nothing but this channel: one
//! address per partition, one payload per message. Delivery semantics beyond
//! the send/receive interface are the transport's concern.

pub mod udp;

pub use udp::*;

use thiserror::Error;

/// Number of partitions the channel fans out across
pub const PARTITION_COUNT: u32 = 2;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown partition {0}")]
    UnknownPartition(u32),
}

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Partition for the payload at `sequence_index` in fetch order.
///
/// Purely positional, never content-based: the same year always produces
/// the same assignments.
pub fn partition_for(sequence_index: usize) -> u32 {
    (sequence_index % PARTITION_COUNT as usize) as u32
}
