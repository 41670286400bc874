//! Growable ring buffer backing the queue's overflow storage
//!
//! The buffer has no synchronisation of its own. [`AsyncQueue`](crate::queue::AsyncQueue)
//! only touches it while holding the controller lock.

/// Dynamically growing circular buffer of opaque items
///
/// Valid items occupy slots `first, first + 1, ..., first + count - 1`
/// (modulo the slot count). Pushing onto a full buffer doubles the slot
/// count and re-linearises the wrapped contents starting at slot 0.
/// The buffer never shrinks.
#[derive(Debug)]
pub struct RingBuffer<T> {
    items: Vec<Option<T>>,
    first: usize,
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Create a buffer with `capacity` slots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, || None);
        Self {
            items,
            first: 0,
            count: 0,
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current slot count
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn is_full(&self) -> bool {
        self.count == self.items.len()
    }

    /// Append an item at the tail, doubling the slot count first if full
    pub fn push(&mut self, item: T) {
        if self.is_full() {
            self.grow();
        }
        let tail = (self.first + self.count) % self.items.len();
        self.items[tail] = Some(item);
        self.count += 1;
    }

    /// Remove and return the oldest item
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty. Callers check [`is_empty`](Self::is_empty)
    /// first; reaching the panic means the controller lost track of its state.
    pub fn shift(&mut self) -> T {
        assert!(self.count > 0, "shift called on an empty ring buffer");
        let item = self.items[self.first]
            .take()
            .expect("occupied ring buffer slot was vacant");
        self.first = (self.first + 1) % self.items.len();
        self.count -= 1;
        item
    }

    /// Remove every stored item, oldest first
    ///
    /// Slot count is retained. The items are handed back so the caller
    /// decides where they are dropped.
    pub fn take_all(&mut self) -> Vec<T> {
        let mut removed = Vec::with_capacity(self.count);
        while self.count > 0 {
            removed.push(self.shift());
        }
        self.first = 0;
        removed
    }

    fn grow(&mut self) {
        let old_capacity = self.items.len();
        let mut items = Vec::with_capacity(old_capacity * 2);
        for offset in 0..self.count {
            let index = (self.first + offset) % old_capacity;
            items.push(self.items[index].take());
        }
        items.resize_with(old_capacity * 2, || None);

        self.items = items;
        self.first = 0;
    }
}
