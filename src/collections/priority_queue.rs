use super::error::{QueueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest allocation made when an empty queue first grows
const MIN_CAPACITY: usize = 4;

/// Which end of the priority range sits at the root of the heap
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeapOrder {
    /// Lowest priority is dequeued first
    Min,
    /// Highest priority is dequeued first
    Max,
}

impl HeapOrder {
    /// Returns true if `a` must sit above `b` in the heap
    fn prefers<P: Ord>(self, a: &P, b: &P) -> bool {
        match self {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            HeapOrder::Min => "Min-Priority",
            HeapOrder::Max => "Max-Priority",
        }
    }
}

impl fmt::Display for HeapOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Options for constructing a queue
#[derive(Clone, Debug)]
pub struct QueueOptions {
    pub order: HeapOrder,
    pub capacity: usize,
}

impl QueueOptions {
    pub fn new(order: HeapOrder) -> Self {
        Self { order, capacity: 0 }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Array-backed binary heap of `(value, priority)` pairs.
///
/// The ordering is fixed when the queue is built. Elements with equal
/// priority come out in no particular order: neither insertion order nor its
/// reverse is guaranteed.
///
/// The queue is not internally synchronized. Sharing one between threads
/// requires the caller to wrap it in a lock.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, P = i64> {
    heap: Vec<(P, T)>,
    order: HeapOrder,
}

impl<T, P: Ord> PriorityQueue<T, P> {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            heap: Vec::new(),
            order,
        }
    }

    /// Queue that yields the lowest priority first
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    /// Queue that yields the highest priority first
    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            order,
        }
    }

    pub fn with_options(options: QueueOptions) -> Self {
        Self::with_capacity(options.order, options.capacity)
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Inserts a value and restores heap order. Never fails.
    pub fn enqueue(&mut self, value: T, priority: P) {
        if self.heap.len() == self.heap.capacity() {
            self.grow();
        }
        self.heap.push((priority, value));
        self.sift_up(self.heap.len() - 1);
    }

    /// Returns the root element without removing it
    pub fn peek(&self) -> Result<(&T, &P)> {
        self.try_peek().ok_or(QueueError::Empty)
    }

    pub fn try_peek(&self) -> Option<(&T, &P)> {
        self.heap.first().map(|(priority, value)| (value, priority))
    }

    /// Removes and returns the root element
    pub fn dequeue(&mut self) -> Result<(T, P)> {
        self.try_dequeue().ok_or(QueueError::Empty)
    }

    pub fn try_dequeue(&mut self) -> Option<(T, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let (priority, value) = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((value, priority))
    }

    /// Drops every element but keeps the allocation for reuse
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Iterates in storage order, which is not priority order
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> {
        self.heap.iter().map(|(priority, value)| (value, priority))
    }

    /// Consumes the queue, yielding elements in dequeue order
    pub fn drain_sorted(self) -> DrainSorted<T, P> {
        DrainSorted { queue: self }
    }

    fn grow(&mut self) {
        let current = self.heap.capacity();
        let target = (current * 2).max(MIN_CAPACITY);
        self.heap.reserve_exact(target - self.heap.len());
        tracing::trace!("Priority queue grew from {} to {} slots", current, self.heap.capacity());
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.order.prefers(&self.heap[index].0, &self.heap[parent].0) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let best = if right < len && self.order.prefers(&self.heap[right].0, &self.heap[left].0) {
                right
            } else {
                left
            };
            if !self.order.prefers(&self.heap[best].0, &self.heap[index].0) {
                break;
            }
            self.heap.swap(index, best);
            index = best;
        }
    }

    /// Checks the heap-order invariant over every parent/child pair
    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|child| {
            let parent = (child - 1) / 2;
            !self.order.prefers(&self.heap[child].0, &self.heap[parent].0)
        })
    }
}

impl<T, P: Ord> Extend<(T, P)> for PriorityQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

/// Iterator returned by [`PriorityQueue::drain_sorted`]
pub struct DrainSorted<T, P> {
    queue: PriorityQueue<T, P>,
}

impl<T, P: Ord> Iterator for DrainSorted<T, P> {
    type Item = (T, P);

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.try_dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T, P: Ord> ExactSizeIterator for DrainSorted<T, P> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random sequence for operation mixes
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }
    }

    #[test]
    fn test_max_dequeue_order() {
        let mut queue = PriorityQueue::max();
        for p in [5, 1, 4, 2, 3] {
            queue.enqueue(format!("item{}", p), p);
        }

        let priorities: Vec<i64> = queue.drain_sorted().map(|(_, p)| p).collect();
        assert_eq!(priorities, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_min_dequeue_order() {
        let mut queue = PriorityQueue::min();
        for p in [5, 1, 4, 2, 3] {
            queue.enqueue(p * 10, p);
        }

        let values: Vec<i64> = queue.drain_sorted().map(|(v, _)| v).collect();
        assert_eq!(values, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = PriorityQueue::max();
        queue.enqueue("low", 1);
        queue.enqueue("high", 9);

        assert_eq!(queue.peek(), Ok((&"high", &9)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue(), Ok(("high", 9)));
        assert_eq!(queue.peek(), Ok((&"low", &1)));
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: PriorityQueue<&str> = PriorityQueue::min();
        assert_eq!(queue.peek(), Err(QueueError::Empty));
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));

        queue.enqueue("only", 3);
        assert!(queue.dequeue().is_ok());
        assert_eq!(queue.peek(), Err(QueueError::Empty));
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));
        assert!(queue.try_peek().is_none());
        assert!(queue.try_dequeue().is_none());
    }

    #[test]
    fn test_heap_invariant_and_count() {
        for order in [HeapOrder::Min, HeapOrder::Max] {
            let mut rng = Lcg(0x5eed);
            let mut queue = PriorityQueue::new(order);
            let mut enqueued = 0usize;
            let mut dequeued = 0usize;

            for step in 0..2000 {
                if rng.next() % 3 == 0 && !queue.is_empty() {
                    queue.dequeue().unwrap();
                    dequeued += 1;
                } else {
                    queue.enqueue(step, (rng.next() % 50) as i64);
                    enqueued += 1;
                }
                assert!(queue.is_heap(), "heap order broken at step {}", step);
                assert_eq!(queue.len(), enqueued - dequeued);
            }

            let drained: Vec<i64> = queue.drain_sorted().map(|(_, p)| p).collect();
            let mut expected = drained.clone();
            match order {
                HeapOrder::Min => expected.sort(),
                HeapOrder::Max => expected.sort_by(|a, b| b.cmp(a)),
            }
            assert_eq!(drained, expected);
        }
    }

    #[test]
    fn test_ties_have_no_ordering_guarantee() {
        // Only membership and priority are checked for tied entries; their
        // relative order is deliberately left unasserted.
        let mut queue = PriorityQueue::max();
        for value in ["a", "b", "c", "d"] {
            queue.enqueue(value, 7);
        }
        queue.enqueue("top", 8);

        assert_eq!(queue.dequeue(), Ok(("top", 8)));
        let mut tied: Vec<&str> = Vec::new();
        while let Ok((value, priority)) = queue.dequeue() {
            assert_eq!(priority, 7);
            tied.push(value);
        }
        tied.sort();
        assert_eq!(tied, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut queue = PriorityQueue::with_options(QueueOptions::new(HeapOrder::Min).with_capacity(16));
        assert!(queue.capacity() >= 16);
        queue.extend((0..10).map(|i| (i, i)));
        let capacity = queue.capacity();

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), capacity);
        assert_eq!(queue.peek(), Err(QueueError::Empty));
    }

    #[test]
    fn test_order_display() {
        assert_eq!(HeapOrder::Min.to_string(), "Min-Priority");
        assert_eq!(HeapOrder::Max.to_string(), "Max-Priority");

        let queue: PriorityQueue<()> = PriorityQueue::max();
        assert_eq!(queue.order().display_name(), "Max-Priority");
    }

    #[test]
    fn test_capacity_doubles() {
        let mut queue = PriorityQueue::min();
        assert_eq!(queue.capacity(), 0);

        queue.enqueue((), 1);
        assert!(queue.capacity() >= MIN_CAPACITY);
        let first = queue.capacity();
        for p in 1..first {
            queue.enqueue((), p as i64);
        }
        assert_eq!(queue.capacity(), first);

        queue.enqueue((), 0);
        assert!(queue.capacity() >= first * 2);
    }
}
