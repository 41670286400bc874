//! Test modules for the queue system
//!
//! This module organizes the test suites for the async queue by functional area.

mod overflow;

use crate::queue::api::{AsyncQueue, QueueConfig};
use std::time::{Duration, Instant};

/// Create a queue with the given channel capacity and default buffer size
pub(super) fn queue_with_capacity<T: Send + 'static>(channel_capacity: usize) -> AsyncQueue<T> {
    AsyncQueue::with_config(QueueConfig::default().with_channel_capacity(channel_capacity))
        .expect("queue should start")
}

/// Poll `condition` until it holds or five seconds pass
pub(super) fn wait_for(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}
