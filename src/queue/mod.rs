//! Unbounded Async Queue Component
//!
//! A generic FIFO queue that decouples producers from consumers. Producers
//! never wait for consumers: items go straight into a bounded delivery
//! channel when it has room and spill into a growable ring buffer when it
//! does not. A background pump thread refills the channel from the buffer
//! as consumers make space.
//!
//! # Overview
//!
//! - **Non-blocking producers**: `add` only ever waits for the internal lock
//! - **Competing consumers**: every receive handle reads one shared channel;
//!   each item is delivered exactly once
//! - **Strict FIFO**: fast-path and buffered items keep a single global order
//! - **Bounded consumer exposure**: consumers only ever see the channel's
//!   fixed capacity, while pending work is held in the ring buffer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ add                │ add                │ add
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 AsyncQueue (single lock)                │
//! │   buffer empty & room?  ──── fast path ──────────┐      │
//! │          │ no                                    │      │
//! │          ▼                                       ▼      │
//! │  ┌───┬───┬───┬───┬───┐   pump thread   ┌───┬───┬───┐   │
//! │  │ 4 │ 5 │ 6 │ 7 │...│ ──────────────▶ │ 1 │ 2 │ 3 │   │
//! │  └───┴───┴───┴───┴───┘   (condvar)     └───┴───┴───┘   │
//! │      RingBuffer                       delivery channel  │
//! └──────────────────────────────────────────────┬──────────┘
//!                                   recv         │
//!                  ┌─────────────────┬───────────┴─────┐
//!            ┌─────┴─────┐     ┌─────┴─────┐     ┌─────┴─────┐
//!            │Consumer A │     │Consumer B │     │Consumer C │ (competing)
//!            └───────────┘     └───────────┘     └───────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use asyncqueue::queue::{AsyncQueue, QueueConfig};
//! use std::thread;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = AsyncQueue::with_config(QueueConfig::default().with_channel_capacity(4))?;
//! let receiver = queue.next();
//!
//! // Only four items fit in the channel; the rest are buffered
//! queue.add(vec!["a", "b", "c", "d", "e", "f"]);
//! assert_eq!(queue.stats().buffered, 2);
//!
//! let consumer = thread::spawn(move || receiver.iter().collect::<Vec<_>>());
//! while queue.stats().pending() > 0 {
//!     thread::yield_now();
//! }
//! queue.close();
//!
//! assert_eq!(consumer.join().unwrap(), vec!["a", "b", "c", "d", "e", "f"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod api;
mod config;
mod controller;
mod error;
mod receiver;
mod ring;
mod types;

pub use config::{
    QueueConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_CHANNEL_CAPACITY, DEFAULT_PUMP_THREAD_NAME,
};
pub use controller::AsyncQueue;
pub use error::{QueueError, QueueResult, RecvError};
pub use receiver::{IntoIter, Iter, QueueReceiver, TryIter};
pub use ring::RingBuffer;
pub use types::QueueStats;

#[cfg(test)]
mod tests;
