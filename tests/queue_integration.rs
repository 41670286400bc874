//! Queue integration tests
//!
//! Exercise the public API the way an embedding application would:
//! shared producers behind an `Arc`, consumers on their own threads.

use asyncqueue::queue::api::{AsyncQueue, QueueConfig, RecvError};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn wait_until_drained<T>(queue: &AsyncQueue<T>) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while queue.stats().pending() > 0 {
        assert!(Instant::now() < deadline, "Queue did not drain: {:?}", queue.stats());
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_fifo_across_channel_capacity() {
    let queue = AsyncQueue::new().unwrap();
    let receiver = queue.next();

    queue.add(0..500u32);
    let received: Vec<u32> = (0..500).map(|_| receiver.recv().unwrap()).collect();

    assert_eq!(received, (0..500).collect::<Vec<_>>());
}

#[test]
fn test_no_loss_across_many_add_calls() {
    let queue = AsyncQueue::with_config(QueueConfig::default().with_channel_capacity(3)).unwrap();
    let receiver = queue.next();
    let consumer = thread::spawn(move || receiver.iter().collect::<Vec<String>>());

    let mut expected = Vec::new();
    for batch in 0..100 {
        let items: Vec<String> = (0..batch % 5).map(|i| format!("{}-{}", batch, i)).collect();
        expected.extend(items.iter().cloned());
        queue.add(items);
    }
    wait_until_drained(&queue);
    queue.close();

    assert_eq!(consumer.join().unwrap(), expected);
}

#[test]
fn test_competing_consumers_with_shared_producers() {
    let queue = Arc::new(
        AsyncQueue::with_config(QueueConfig::default().with_channel_capacity(16)).unwrap(),
    );

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let receiver = queue.next();
            thread::spawn(move || receiver.iter().collect::<Vec<(usize, u32)>>())
        })
        .collect();

    let producers: Vec<_> = (0..4)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for seq in 0..2_500u32 {
                    queue.push((producer, seq));
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    wait_until_drained(&queue);
    queue.close();

    let mut seen = HashSet::new();
    for consumer in consumers {
        let items = consumer.join().unwrap();
        let mut last = [None::<u32>; 4];
        for (producer, seq) in items {
            if let Some(previous) = last[producer] {
                assert!(seq > previous, "Producer {} out of order", producer);
            }
            last[producer] = Some(seq);
            assert!(seen.insert((producer, seq)), "Duplicate {:?}", (producer, seq));
        }
    }
    assert_eq!(seen.len(), 10_000);
}

#[test]
fn test_end_of_stream_after_close() {
    let queue = AsyncQueue::new().unwrap();
    let receiver = queue.next();

    queue.add(["only"]);
    assert_eq!(receiver.recv(), Some("only"));

    queue.close();
    assert_eq!(receiver.recv(), None);
    assert_eq!(
        receiver.recv_timeout(Duration::from_millis(5)),
        Err(RecvError::Closed)
    );
}

#[test]
fn test_config_loaded_from_toml() {
    let config = QueueConfig::from_toml_str("channel-capacity = 2\nbuffer-capacity = 2").unwrap();
    let queue = AsyncQueue::with_config(config).unwrap();

    queue.add(0..10);
    let stats = queue.stats();
    assert_eq!(stats.in_channel, 2);
    assert_eq!(stats.buffered, 8);
    assert_eq!(stats.buffer_capacity, 8);
}
