//! AsyncQueue controller and pump thread
//!
//! The controller owns a [`RingBuffer`] and the sending half of a bounded
//! delivery channel. All mutation of the buffer and every write into the
//! channel happens while holding one lock, which is what keeps the fast
//! path and the buffered path in a single FIFO order:
//!
//! - the fast path only writes straight to the channel when the buffer is
//!   empty, so nothing buffered can be overtaken;
//! - channel free space only grows while the lock is held (consumers
//!   receive, nobody else sends), so a checked write never blocks.
//!
//! A dedicated pump thread parks on a condition variable and moves buffered
//! items into the channel when producers buffer work or consumers free space.

use crate::queue::config::QueueConfig;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::receiver::QueueReceiver;
use crate::queue::ring::RingBuffer;
use crate::queue::types::QueueStats;
use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// State guarded by the controller lock
struct State<T> {
    buffer: RingBuffer<T>,
    /// Taken on close; dropping it closes the delivery channel
    sender: Option<Sender<T>>,
    closed: bool,
}

impl<T> State<T> {
    /// Move buffered items into the channel while it has free slots
    fn flush(&mut self) -> usize {
        let Some(sender) = self.sender.as_ref() else {
            return 0;
        };

        let mut moved = 0;
        while !self.buffer.is_empty() && !sender.is_full() {
            deliver(sender, self.buffer.shift());
            moved += 1;
        }
        moved
    }

    /// Place new items, in order, on the fast path or into the buffer
    ///
    /// Returns the number of items that had to be buffered.
    fn accept(&mut self, items: Vec<T>) -> usize {
        let mut buffered = 0;
        for item in items {
            match self.sender.as_ref() {
                Some(sender) if self.buffer.is_empty() && !sender.is_full() => {
                    deliver(sender, item);
                }
                _ => {
                    self.buffer.push(item);
                    buffered += 1;
                }
            }
        }
        buffered
    }
}

fn deliver<T>(sender: &Sender<T>, item: T) {
    match sender.try_send(item) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            unreachable!("delivery channel filled while the queue lock was held")
        }
        Err(TrySendError::Disconnected(_)) => {
            unreachable!("delivery channel disconnected while the queue was open")
        }
    }
}

/// Lock and wake-up signal shared by the controller, pump and receivers
pub(crate) struct Shared<T> {
    state: Mutex<State<T>>,
    wake: Condvar,
    /// Mirror of `state.buffer.len()`, only written under the lock
    buffered: AtomicUsize,
}

impl<T> Shared<T> {
    fn publish_buffered(&self, state: &State<T>) {
        self.buffered.store(state.buffer.len(), Ordering::SeqCst);
    }

    /// Called after a consumer took an item out of the channel
    ///
    /// Receivers skip the lock entirely while nothing is buffered. Otherwise
    /// taking the lock before signalling means the pump is either parked
    /// (and receives the signal) or has not yet checked for free space.
    pub(crate) fn on_receive(&self) {
        if self.buffered.load(Ordering::SeqCst) == 0 {
            return;
        }

        let pending = {
            let state = self.state.lock();
            !state.closed && !state.buffer.is_empty()
        };
        if pending {
            self.wake.notify_one();
        }
    }
}

fn run_pump<T>(shared: Arc<Shared<T>>) {
    let mut state = shared.state.lock();
    loop {
        if state.closed {
            break;
        }

        let moved = state.flush();
        shared.publish_buffered(&state);
        if moved > 0 {
            log::trace!(
                "Pump moved {} items into the delivery channel, {} still buffered",
                moved,
                state.buffer.len()
            );
        }

        shared.wake.wait(&mut state);
    }
    log::trace!("Pump thread exiting");
}

/// Unbounded FIFO queue with non-blocking producers and a bounded
/// delivery channel for consumers
///
/// Producers call [`add`](Self::add) or [`push`](Self::push) from any number
/// of threads; neither blocks on anything but the internal lock. Consumers
/// obtain a [`QueueReceiver`] from [`next`](Self::next) and compete for
/// items.
///
/// # Shutdown
///
/// [`close`](Self::close) stops the pump thread and closes the delivery
/// channel. Receivers still get every item already in the channel before
/// they observe end-of-stream; items that were still waiting in the ring
/// buffer are discarded. Closing twice is harmless, adding after close is
/// ignored, and dropping the queue closes it.
///
/// # Example
///
/// ```rust
/// use asyncqueue::queue::AsyncQueue;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = AsyncQueue::new()?;
/// let receiver = queue.next();
///
/// queue.add(1..=20);
/// let first: Vec<i32> = receiver.iter().take(20).collect();
/// assert_eq!(first, (1..=20).collect::<Vec<_>>());
///
/// queue.close();
/// assert_eq!(receiver.recv(), None);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct AsyncQueue<T> {
    shared: Arc<Shared<T>>,
    receiver: Receiver<T>,
    pump: Mutex<Option<JoinHandle<()>>>,
    channel_capacity: usize,
}

impl<T: Send + 'static> AsyncQueue<T> {
    /// Create a queue with the default configuration
    pub fn new() -> QueueResult<Self> {
        Self::with_config(QueueConfig::default())
    }

    /// Create a queue and start its pump thread
    pub fn with_config(config: QueueConfig) -> QueueResult<Self> {
        config.validate()?;

        let (sender, receiver) = channel::bounded(config.channel_capacity);
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                buffer: RingBuffer::with_capacity(config.buffer_capacity),
                sender: Some(sender),
                closed: false,
            }),
            wake: Condvar::new(),
            buffered: AtomicUsize::new(0),
        });

        let pump_shared = Arc::clone(&shared);
        let pump = thread::Builder::new()
            .name(config.pump_thread_name.clone())
            .spawn(move || run_pump(pump_shared))
            .map_err(|source| QueueError::PumpSpawn { source })?;

        log::debug!(
            "Created queue (buffer capacity {}, channel capacity {}, pump '{}')",
            config.buffer_capacity,
            config.channel_capacity,
            config.pump_thread_name
        );

        Ok(Self {
            shared,
            receiver,
            pump: Mutex::new(Some(pump)),
            channel_capacity: config.channel_capacity,
        })
    }
}

impl<T> AsyncQueue<T> {
    /// Add items in order
    ///
    /// Already-buffered items are first moved into any free channel slots.
    /// New items then go straight to the channel while the buffer is empty
    /// and the channel has room; the rest are buffered and the pump is
    /// signalled once. An empty batch is a no-op, as is any add after
    /// [`close`](Self::close).
    pub fn add<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }

        let buffered = {
            let mut state = self.shared.state.lock();
            if state.closed {
                log::debug!("Ignoring {} items added after close", items.len());
                return;
            }
            state.flush();
            let buffered = state.accept(items);
            self.shared.publish_buffered(&state);
            buffered
        };

        if buffered > 0 {
            self.shared.wake.notify_one();
        }
    }

    /// Add a single item
    pub fn push(&self, item: T) {
        self.add(std::iter::once(item));
    }

    /// Receive handle for the delivery channel
    ///
    /// Each call returns a new handle; all handles compete for the same
    /// items and each item is delivered to exactly one of them.
    pub fn next(&self) -> QueueReceiver<T> {
        QueueReceiver::new(self.receiver.clone(), Arc::clone(&self.shared))
    }

    /// Close the queue and wait for the pump thread to exit
    ///
    /// Once any call returns, or [`is_closed`](Self::is_closed) reports
    /// true, the delivery channel is disconnected: receivers get what is
    /// already in it and then end-of-stream.
    pub fn close(&self) {
        let discarded = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            // Dropping the only sender disconnects the channel
            state.sender = None;

            let discarded = state.buffer.take_all();
            self.shared.publish_buffered(&state);
            discarded
        };

        self.shared.wake.notify_all();

        // Item destructors run outside the lock
        if !discarded.is_empty() {
            log::warn!(
                "Queue closed with {} undelivered buffered items",
                discarded.len()
            );
        }
        drop(discarded);

        if let Some(handle) = self.pump.lock().take() {
            if handle.join().is_err() {
                log::error!("Queue pump thread panicked before shutdown");
            }
        }
        log::debug!("Queue closed");
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Snapshot of buffer and channel occupancy
    pub fn stats(&self) -> QueueStats {
        let state = self.shared.state.lock();
        QueueStats {
            buffered: state.buffer.len(),
            in_channel: self.receiver.len(),
            buffer_capacity: state.buffer.capacity(),
            channel_capacity: self.channel_capacity,
            closed: state.closed,
        }
    }
}

impl<T> Drop for AsyncQueue<T> {
    fn drop(&mut self) {
        self.close();
    }
}
