//! Ring buffer overflow tests
//!
//! Producers that outpace consumers spill into the ring buffer, which must
//! grow by doubling and hand every item back in order.

#[cfg(test)]
mod tests {
    use crate::queue::api::{AsyncQueue, QueueConfig};
    use crate::queue::tests::{queue_with_capacity, wait_for};
    use std::thread;

    #[test]
    fn test_buffer_doubles_without_consumer() {
        let queue = queue_with_capacity(16);

        queue.add(0..100);

        let stats = queue.stats();
        assert_eq!(stats.in_channel, 16);
        assert_eq!(stats.buffered, 84);
        // 16 -> 32 -> 64 -> 128
        assert_eq!(stats.buffer_capacity, 128);
        assert_eq!(stats.pending(), 100);
        assert_eq!(stats.free_slots(), 0);
    }

    #[test]
    fn test_overflowed_items_received_in_order() {
        let queue = queue_with_capacity(16);
        queue.add(0..1000u32);

        let receiver = queue.next();
        let received: Vec<u32> = (0..1000).map(|_| receiver.recv().unwrap()).collect();

        assert_eq!(received, (0..1000).collect::<Vec<_>>());
        assert_eq!(queue.stats().pending(), 0);
    }

    #[test]
    fn test_growth_from_tiny_initial_buffer() {
        let config = QueueConfig::default()
            .with_buffer_capacity(1)
            .with_channel_capacity(1);
        let queue = AsyncQueue::with_config(config).unwrap();

        for i in 0..33 {
            queue.push(i);
        }

        let stats = queue.stats();
        assert_eq!(stats.buffered, 32);
        assert_eq!(stats.buffer_capacity, 32);

        let receiver = queue.next();
        let received: Vec<_> = (0..33).map(|_| receiver.recv().unwrap()).collect();
        assert_eq!(received, (0..33).collect::<Vec<_>>());
    }

    #[test]
    fn test_buffer_capacity_is_retained_after_drain() {
        let queue = queue_with_capacity(4);
        queue.add(0..40);
        let grown = queue.stats().buffer_capacity;
        assert!(grown >= 36);

        let receiver = queue.next();
        for _ in 0..40 {
            receiver.recv().unwrap();
        }
        assert!(wait_for(|| queue.stats().pending() == 0));

        assert_eq!(queue.stats().buffer_capacity, grown);
    }

    #[test]
    fn test_late_consumer_drains_large_backlog() {
        let queue = queue_with_capacity(8);
        let count = 50_000u64;

        for chunk in (0..count).collect::<Vec<_>>().chunks(1000) {
            queue.add(chunk.iter().copied());
        }
        assert_eq!(queue.stats().pending(), count as usize);

        let receiver = queue.next();
        let consumer = thread::spawn(move || {
            let mut expected = 0u64;
            while expected < count {
                let item = receiver.recv().expect("queue still open");
                assert_eq!(item, expected);
                expected += 1;
            }
            expected
        });

        assert_eq!(consumer.join().unwrap(), count);
    }
}
