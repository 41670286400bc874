//! Consumer handle for the delivery channel
//!
//! Every handle returned by [`AsyncQueue::next`](crate::queue::AsyncQueue::next)
//! reads the same bounded channel. Handles can be cloned and moved to other
//! threads; concurrent readers compete for items.

use crate::queue::controller::Shared;
use crate::queue::error::RecvError;
use crossbeam::channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// Receive end of an [`AsyncQueue`](crate::queue::AsyncQueue)
///
/// Each successful receive frees a channel slot and wakes the pump if
/// items are still waiting in the ring buffer.
///
/// # Example
///
/// ```rust
/// use asyncqueue::queue::AsyncQueue;
/// use std::thread;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = AsyncQueue::new()?;
/// let receiver = queue.next();
///
/// let consumer = thread::spawn(move || receiver.iter().collect::<Vec<u32>>());
///
/// queue.add(0..100);
/// while queue.stats().pending() > 0 {
///     thread::yield_now();
/// }
/// queue.close();
///
/// assert_eq!(consumer.join().unwrap(), (0..100).collect::<Vec<_>>());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct QueueReceiver<T> {
    inner: Receiver<T>,
    shared: Arc<Shared<T>>,
}

impl<T> QueueReceiver<T> {
    pub(crate) fn new(inner: Receiver<T>, shared: Arc<Shared<T>>) -> Self {
        Self { inner, shared }
    }

    /// Block until an item arrives
    ///
    /// Returns `None` once the queue is closed and the channel is drained.
    pub fn recv(&self) -> Option<T> {
        let item = self.inner.recv().ok()?;
        self.shared.on_receive();
        Some(item)
    }

    /// Take an item if one is ready
    pub fn try_recv(&self) -> Result<T, RecvError> {
        match self.inner.try_recv() {
            Ok(item) => {
                self.shared.on_receive();
                Ok(item)
            }
            Err(TryRecvError::Empty) => Err(RecvError::Empty),
            Err(TryRecvError::Disconnected) => Err(RecvError::Closed),
        }
    }

    /// Block for at most `timeout` waiting for an item
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvError> {
        match self.inner.recv_timeout(timeout) {
            Ok(item) => {
                self.shared.on_receive();
                Ok(item)
            }
            Err(RecvTimeoutError::Timeout) => Err(RecvError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(RecvError::Closed),
        }
    }

    /// Blocking iterator that ends at end-of-stream
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { receiver: self }
    }

    /// Non-blocking iterator over the items ready right now
    pub fn try_iter(&self) -> TryIter<'_, T> {
        TryIter { receiver: self }
    }

    /// Items currently in the delivery channel
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Delivery channel capacity
    pub fn capacity(&self) -> usize {
        self.inner.capacity().unwrap_or(0)
    }
}

impl<T> Clone for QueueReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for QueueReceiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueReceiver")
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.capacity())
            .finish()
    }
}

/// Blocking iterator returned by [`QueueReceiver::iter`]
pub struct Iter<'a, T> {
    receiver: &'a QueueReceiver<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.recv()
    }
}

/// Non-blocking iterator returned by [`QueueReceiver::try_iter`]
pub struct TryIter<'a, T> {
    receiver: &'a QueueReceiver<T>,
}

impl<T> Iterator for TryIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

/// Owning blocking iterator
pub struct IntoIter<T> {
    receiver: QueueReceiver<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.recv()
    }
}

impl<'a, T> IntoIterator for &'a QueueReceiver<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for QueueReceiver<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { receiver: self }
    }
}
