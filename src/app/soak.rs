//! Concurrency soak test
//!
//! Drives one queue with many async producers and blocking consumers,
//! then checks that every item was delivered exactly once and that each
//! consumer saw each producer's items in order.

use crate::app::error::AppResult;
use crate::queue::{AsyncQueue, QueueConfig, QueueReceiver};
use colored::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Item label: (producer index, sequence within that producer)
type Labeled = (usize, u64);

/// Fully resolved soak-test parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoakSettings {
    pub producers: usize,
    pub consumers: usize,
    /// Items per producer
    pub items: usize,
    /// Items per add call
    pub batch: usize,
    pub queue: QueueConfig,
}

impl Default for SoakSettings {
    fn default() -> Self {
        Self {
            producers: 4,
            consumers: 4,
            items: 10_000,
            batch: 8,
            queue: QueueConfig::default(),
        }
    }
}

/// What one consumer observed
#[derive(Debug, Default)]
struct ConsumerTally {
    items: Vec<Labeled>,
    out_of_order: u64,
}

fn drain(receiver: QueueReceiver<Labeled>) -> ConsumerTally {
    let mut tally = ConsumerTally::default();
    let mut last_seen: HashMap<usize, u64> = HashMap::new();

    for (producer, seq) in receiver.iter() {
        if let Some(previous) = last_seen.insert(producer, seq) {
            if seq <= previous {
                tally.out_of_order += 1;
            }
        }
        tally.items.push((producer, seq));
    }
    tally
}

/// Outcome of a soak run
#[derive(Debug, Clone, PartialEq)]
pub struct SoakReport {
    pub produced: u64,
    pub received: u64,
    pub duplicates: u64,
    pub missing: u64,
    pub out_of_order: u64,
    /// Items received by each consumer
    pub per_consumer: Vec<u64>,
    /// Ring buffer slot count at the end of the run
    pub buffer_capacity: usize,
    pub elapsed: Duration,
    pub interrupted: bool,
}

impl SoakReport {
    pub fn is_clean(&self) -> bool {
        !self.interrupted && self.duplicates == 0 && self.missing == 0 && self.out_of_order == 0
    }

    /// Received items per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.received as f64 / secs
        } else {
            0.0
        }
    }
}

async fn produce_all(
    producers: &mut JoinSet<()>,
    queue: &AsyncQueue<Labeled>,
) -> AppResult<()> {
    while let Some(result) = producers.join_next().await {
        result?;
    }
    while queue.stats().pending() > 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    Ok(())
}

/// Run the soak test to completion or until Ctrl-C
pub async fn run_soak(settings: &SoakSettings) -> AppResult<SoakReport> {
    let queue = Arc::new(AsyncQueue::<Labeled>::with_config(settings.queue.clone())?);
    let produced = Arc::new(AtomicU64::new(0));
    let started = Instant::now();

    log::info!(
        "Soak test: {} producers x {} items (batch {}), {} consumers, channel capacity {}",
        settings.producers,
        settings.items,
        settings.batch,
        settings.consumers,
        settings.queue.channel_capacity
    );

    let mut consumers = JoinSet::new();
    for _ in 0..settings.consumers {
        let receiver = queue.next();
        consumers.spawn_blocking(move || drain(receiver));
    }

    let mut producers = JoinSet::new();
    for producer in 0..settings.producers {
        let queue = Arc::clone(&queue);
        let produced = Arc::clone(&produced);
        let items = settings.items as u64;
        let batch = settings.batch as u64;
        producers.spawn(async move {
            let mut seq = 0;
            while seq < items {
                let end = (seq + batch).min(items);
                queue.add((seq..end).map(|s| (producer, s)));
                produced.fetch_add(end - seq, Ordering::Relaxed);
                seq = end;
                tokio::task::yield_now().await;
            }
            log::debug!("Producer {} finished after {} items", producer, items);
        });
    }

    let interrupted = tokio::select! {
        result = produce_all(&mut producers, &queue) => {
            result?;
            false
        }
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, closing queue early");
            true
        }
    };
    producers.abort_all();

    let buffer_capacity = queue.stats().buffer_capacity;
    queue.close();

    let mut per_consumer = Vec::with_capacity(settings.consumers);
    let mut out_of_order = 0;
    let mut all_items = Vec::new();
    while let Some(result) = consumers.join_next().await {
        let tally = result?;
        per_consumer.push(tally.items.len() as u64);
        out_of_order += tally.out_of_order;
        all_items.extend(tally.items);
    }

    let received = all_items.len() as u64;
    let unique: HashSet<Labeled> = all_items.into_iter().collect();
    let duplicates = received - unique.len() as u64;
    let produced = produced.load(Ordering::Relaxed);

    Ok(SoakReport {
        produced,
        received,
        duplicates,
        missing: produced.saturating_sub(unique.len() as u64),
        out_of_order,
        per_consumer,
        buffer_capacity,
        elapsed: started.elapsed(),
        interrupted,
    })
}

/// Print a human-readable summary of a soak run
pub fn print_report(report: &SoakReport) {
    let status = if report.is_clean() {
        "✓ PASS".green().bold()
    } else {
        "✗ FAIL".red().bold()
    };

    println!("{} asyncqueue soak test", status);
    println!("  produced      {}", report.produced);
    println!("  received      {}", report.received);
    println!(
        "  per consumer  {}",
        report
            .per_consumer
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  buffer slots  {}", report.buffer_capacity);
    println!(
        "  elapsed       {:.3}s ({:.0} items/s)",
        report.elapsed.as_secs_f64(),
        report.throughput()
    );

    let problems = [
        ("duplicates", report.duplicates),
        ("missing", report.missing),
        ("out of order", report.out_of_order),
    ];
    for (label, count) in problems {
        if count > 0 {
            println!("  {} {}", format!("{:<13}", label).red(), count);
        }
    }
    if report.interrupted {
        println!("  {}", "interrupted before completion".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_small_soak_run_is_clean() {
        let settings = SoakSettings {
            producers: 3,
            consumers: 2,
            items: 500,
            batch: 7,
            queue: QueueConfig::default().with_channel_capacity(4),
        };

        let report = run_soak(&settings).await.unwrap();

        assert!(report.is_clean(), "Unexpected report: {:?}", report);
        assert_eq!(report.produced, 1500);
        assert_eq!(report.received, 1500);
        assert_eq!(report.per_consumer.len(), 2);
        assert_eq!(report.per_consumer.iter().sum::<u64>(), 1500);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_single_consumer_sees_global_per_producer_order() {
        let settings = SoakSettings {
            producers: 2,
            consumers: 1,
            items: 1000,
            batch: 1,
            queue: QueueConfig::default()
                .with_channel_capacity(2)
                .with_buffer_capacity(2),
        };

        let report = run_soak(&settings).await.unwrap();

        assert_eq!(report.out_of_order, 0);
        assert_eq!(report.per_consumer, vec![2000]);
    }

    #[test]
    fn test_report_flags_problems() {
        let report = SoakReport {
            produced: 10,
            received: 11,
            duplicates: 1,
            missing: 0,
            out_of_order: 0,
            per_consumer: vec![11],
            buffer_capacity: 16,
            elapsed: Duration::from_secs(1),
            interrupted: false,
        };

        assert!(!report.is_clean());
        assert_eq!(report.throughput(), 11.0);
    }

    #[test]
    fn test_interrupted_report_is_not_clean() {
        let report = SoakReport {
            produced: 5,
            received: 5,
            duplicates: 0,
            missing: 0,
            out_of_order: 0,
            per_consumer: vec![5],
            buffer_capacity: 16,
            elapsed: Duration::ZERO,
            interrupted: true,
        };

        assert!(!report.is_clean());
        assert_eq!(report.throughput(), 0.0);
    }
}
