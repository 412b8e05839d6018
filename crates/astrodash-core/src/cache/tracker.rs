use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Proof of having issued a request for a key. Only a
/// [`RequestTracker`] can mint one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    seq: u64,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Per-key request sequence numbers.
///
/// Only the most recently issued ticket for a key is current; results
/// carried by older tickets are stale.
#[derive(Debug)]
pub struct RequestTracker<K: Eq + Hash> {
    latest: DashMap<K, u64>,
    next: AtomicU64,
}

impl<K: Eq + Hash + Copy> RequestTracker<K> {
    pub fn new() -> Self {
        Self {
            latest: DashMap::new(),
            next: AtomicU64::new(1),
        }
    }

    pub fn issue(&self, key: K) -> Ticket<K> {
        let seq = self.next.fetch_add(1, Ordering::Relaxed);
        self.latest.insert(key, seq);
        Ticket { key, seq }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest
            .get(&ticket.key)
            .is_some_and(|latest| *latest == ticket.seq)
    }
}

impl<K: Eq + Hash + Copy> Default for RequestTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
