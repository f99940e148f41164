//! Request counters
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the Card endpoints
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    cards_created: AtomicU64,
    cards_updated: AtomicU64,
    cards_deleted: AtomicU64,
    lookups: AtomicU64,
    lookup_misses: AtomicU64,
    requests_rejected: AtomicU64,
    store_errors: AtomicU64,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub cards_created: u64,
    pub cards_updated: u64,
    pub cards_deleted: u64,
    pub lookups: u64,
    pub lookup_misses: u64,
    pub requests_rejected: u64,
    pub store_errors: u64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_cards_created(&self) {
        self.cards_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cards_updated(&self) {
        self.cards_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cards_deleted(&self) {
        self.cards_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a key or list lookup
    pub fn increment_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a lookup, update or delete that matched nothing
    pub fn increment_lookup_misses(&self) {
        self.lookup_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a request refused before reaching the store
    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cards_created: self.cards_created.load(Ordering::Relaxed),
            cards_updated: self.cards_updated.load(Ordering::Relaxed),
            cards_deleted: self.cards_deleted.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }

    /// Snapshot as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}
