//! Type definitions for the queue system
//!
//! Statistics snapshots reported by [`AsyncQueue::stats`](crate::queue::AsyncQueue::stats).

/// Point-in-time occupancy of a queue
///
/// The numbers are taken under the controller lock but consumers keep
/// receiving concurrently, so `in_channel` may already be stale when read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    /// Items waiting in the ring buffer
    pub buffered: usize,
    /// Items sitting in the delivery channel
    pub in_channel: usize,
    /// Current ring buffer slot count
    pub buffer_capacity: usize,
    /// Fixed delivery channel capacity
    pub channel_capacity: usize,
    /// Whether the queue has been closed
    pub closed: bool,
}

impl QueueStats {
    /// Items added but not yet received by any consumer
    pub fn pending(&self) -> usize {
        self.buffered + self.in_channel
    }

    /// Free delivery channel slots
    pub fn free_slots(&self) -> usize {
        self.channel_capacity.saturating_sub(self.in_channel)
    }
}
