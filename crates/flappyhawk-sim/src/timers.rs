//! One-shot scheduled tasks keyed on simulation time.
//!
//! Replaces delayed continuations with a min-heap of `(fire_time, seq)`.
//! Tasks never get cancelled explicitly; a task whose subject has moved on
//! (a defense round that already ended, an entity already despawned) is
//! simply a no-op when it fires.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work the engine can schedule for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// The defense clock for this round ran out.
    DefenseTimeout { round_id: u64 },
    /// Remove an entity (scored goal posts linger briefly).
    Despawn { entity: hecs::Entity },
}

#[derive(Debug)]
struct Entry<T> {
    fire_at: f64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so BinaryHeap (a max-heap) pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap timer queue. Ties fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn schedule(&mut self, fire_at: f64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { fire_at, seq, task });
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: f64) -> Vec<T> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.fire_at <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.task);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_time_then_schedule_order() {
        let mut q = TimerQueue::default();
        q.schedule(2.0, "late");
        q.schedule(1.0, "first");
        q.schedule(1.0, "second");
        q.schedule(5.0, "future");

        assert_eq!(q.pop_due(2.0), vec!["first", "second", "late"]);
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(4.99).is_empty());
        assert_eq!(q.pop_due(5.0), vec!["future"]);
        assert!(q.is_empty());
    }
}
