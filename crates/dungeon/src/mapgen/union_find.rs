//! Disjoint-set forest over arena keys, used to pick a spanning set of doors.

use std::cmp::Ordering;

use slotmap::{Key, SecondaryMap};

pub(super) struct UnionFind<K: Key> {
    parent: SecondaryMap<K, K>,
    rank: SecondaryMap<K, u8>,
    sets: usize,
}

impl<K: Key> UnionFind<K> {
    pub(super) fn new(keys: impl IntoIterator<Item = K>) -> Self {
        let mut parent = SecondaryMap::new();
        let mut rank = SecondaryMap::new();
        for key in keys {
            if parent.insert(key, key).is_none() {
                rank.insert(key, 0);
            }
        }
        let sets = parent.len();
        Self { parent, rank, sets }
    }

    pub(super) fn set_count(&self) -> usize {
        self.sets
    }

    pub(super) fn find(&mut self, key: K) -> K {
        let mut root = key;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = key;
        while cursor != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    pub(super) fn connected(&mut self, a: K, b: K) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns `false` when both keys already share a set.
    pub(super) fn union(&mut self, a: K, b: K) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.sets -= 1;
        true
    }
}
