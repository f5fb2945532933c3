//! Binary min-heap with an item-to-slot index, giving O(log n) decrease-key.
//! Both search tiers share this queue.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<T> {
    heap: Vec<(f32, T)>,
    slots: HashMap<T, usize>,
}

impl<T> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self { heap: Vec::new(), slots: HashMap::new() }
    }
}

impl<T: Eq + Hash + Clone> IndexedPriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    pub fn priority_of(&self, item: &T) -> Option<f32> {
        self.slots.get(item).map(|&slot| self.heap[slot].0)
    }

    pub fn peek(&self) -> Option<(&T, f32)> {
        self.heap.first().map(|(priority, item)| (item, *priority))
    }

    /// Each item is expected at most once; re-enqueueing a present item is a
    /// caller bug and is rejected in debug builds.
    pub fn enqueue(&mut self, item: T, priority: f32) {
        debug_assert!(!self.contains(&item), "item enqueued twice");
        let slot = self.heap.len();
        self.slots.insert(item.clone(), slot);
        self.heap.push((priority, item));
        self.sift_up(slot);
    }

    /// # Panics
    /// Panics when the queue is empty.
    pub fn dequeue(&mut self) -> T {
        match self.try_dequeue() {
            Some((item, _)) => item,
            None => panic!("dequeue from an empty priority queue"),
        }
    }

    pub fn try_dequeue(&mut self) -> Option<(T, f32)> {
        if self.heap.is_empty() {
            return None;
        }
        let (priority, item) = self.heap.swap_remove(0);
        self.slots.remove(&item);
        if !self.heap.is_empty() {
            self.reindex(0);
            self.sift_down(0);
        }
        Some((item, priority))
    }

    /// # Panics
    /// Panics when `item` is not queued.
    pub fn update_priority(&mut self, item: &T, priority: f32) {
        let Some(&slot) = self.slots.get(item) else {
            panic!("update_priority on an item that is not queued");
        };
        let previous = self.heap[slot].0;
        self.heap[slot].0 = priority;
        if priority < previous {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.heap[parent].0 <= self.heap[child].0 {
                break;
            }
            self.swap(parent, child);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;
            let mut smallest = parent;
            if left < self.heap.len() && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == parent {
                break;
            }
            self.swap(parent, smallest);
            parent = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.reindex(a);
        self.reindex(b);
    }

    fn reindex(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(&self.heap[slot].1) {
            *entry = slot;
        }
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.heap.len(), self.slots.len());
        for (slot, (priority, item)) in self.heap.iter().enumerate() {
            assert_eq!(self.slots.get(item), Some(&slot), "index map out of sync");
            if slot > 0 {
                assert!(self.heap[(slot - 1) / 2].0 <= *priority, "heap order violated");
            }
        }
    }
}
