//! Keyed cache of listing responses.
//!
//! Every `FilterState` value identifies one cache entry. The view only ever
//! reads the entry of the *current* filters, so a response that arrives after
//! the user has moved on is stored under its own key and never shown in
//! place of the current one.
//!
//! The cache hands out a [`FetchTicket`] for each request it wants made.
//! Completing a ticket that has been superseded by a later request for the
//! same key is a no-op.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use tracing::debug;

use crate::models::{FilterState, PageResponse};

/// Default number of entries retained
pub const DEFAULT_CAPACITY: usize = 64;

/// Permission to perform one request for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: FilterState,
    pub request_id: u64,
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Loading { request_id: u64 },
    Ready(Arc<PageResponse>),
    Failed(String),
}

#[derive(Debug, Clone)]
struct Slot {
    entry: CacheEntry,
    /// Monotonic stamp of the last hit or state change, used for eviction order
    touched: u64,
}

/// What the view should show for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase<'a> {
    Loading,
    Success(&'a PageResponse),
    Error(&'a str),
}

#[derive(Debug)]
pub struct QueryCache {
    slots: HashMap<FilterState, Slot>,
    capacity: usize,
    next_request_id: u64,
    clock: u64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl QueryCache {
    /// Cache retaining at most `capacity` completed entries (minimum 1)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: HashMap::new(),
            capacity: capacity.max(1),
            next_request_id: 1,
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn issue(&mut self, key: &FilterState) -> FetchTicket {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let touched = self.tick();
        self.slots.insert(
            key.clone(),
            Slot {
                entry: CacheEntry::Loading { request_id },
                touched,
            },
        );
        FetchTicket {
            key: key.clone(),
            request_id,
        }
    }

    /// Ticket for `key` if it needs fetching.
    ///
    /// Keys already loaded or in flight are deduplicated; a key whose last
    /// attempt failed is retried. A hit counts as a use for eviction order.
    pub fn request(&mut self, key: &FilterState) -> Option<FetchTicket> {
        let stamp = self.tick();
        match self.slots.get_mut(key) {
            Some(Slot {
                entry: CacheEntry::Ready(_),
                touched,
            }) => {
                *touched = stamp;
                debug!(%key, "cache hit");
                None
            }
            Some(Slot {
                entry: CacheEntry::Loading { request_id },
                ..
            }) => {
                debug!(%key, request_id = *request_id, "request already in flight");
                None
            }
            _ => {
                let ticket = self.issue(key);
                debug!(%key, request_id = ticket.request_id, "issuing request");
                Some(ticket)
            }
        }
    }

    /// Unconditional re-request; any in-flight request for the key is
    /// superseded
    pub fn refresh(&mut self, key: &FilterState) -> FetchTicket {
        let ticket = self.issue(key);
        debug!(%key, request_id = ticket.request_id, "forced refresh");
        ticket
    }

    /// Store the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the result dropped.
    ///
    /// `visible` is the key on screen; it is never evicted to make room.
    pub fn complete<E: Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageResponse, E>,
        visible: &FilterState,
    ) -> bool {
        let current = matches!(
            self.slots.get(&ticket.key).map(|s| &s.entry),
            Some(CacheEntry::Loading { request_id }) if *request_id == ticket.request_id
        );
        if !current {
            debug!(key = %ticket.key, request_id = ticket.request_id, "dropping superseded response");
            return false;
        }

        let entry = match result {
            Ok(page) => CacheEntry::Ready(Arc::new(page)),
            Err(e) => CacheEntry::Failed(e.to_string()),
        };
        let touched = self.tick();
        self.slots
            .insert(ticket.key.clone(), Slot { entry, touched });
        self.evict(visible);
        true
    }

    /// Drop the oldest completed entries beyond capacity, sparing `visible`
    fn evict(&mut self, visible: &FilterState) {
        loop {
            let completed = self
                .slots
                .values()
                .filter(|s| !matches!(s.entry, CacheEntry::Loading { .. }))
                .count();
            if completed <= self.capacity {
                return;
            }
            let oldest = self
                .slots
                .iter()
                .filter(|(k, s)| {
                    *k != visible && !matches!(s.entry, CacheEntry::Loading { .. })
                })
                .min_by_key(|(_, s)| s.touched)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(key) => {
                    debug!(%key, "evicting cached page");
                    self.slots.remove(&key);
                }
                None => return,
            }
        }
    }

    /// Phase of `key`; a key with no entry yet counts as loading
    #[must_use]
    pub fn phase(&self, key: &FilterState) -> FetchPhase<'_> {
        match self.slots.get(key).map(|s| &s.entry) {
            Some(CacheEntry::Ready(page)) => FetchPhase::Success(page),
            Some(CacheEntry::Failed(msg)) => FetchPhase::Error(msg),
            Some(CacheEntry::Loading { .. }) | None => FetchPhase::Loading,
        }
    }

    /// Loaded page for `key`, shared
    #[must_use]
    pub fn page(&self, key: &FilterState) -> Option<Arc<PageResponse>> {
        match self.slots.get(key).map(|s| &s.entry) {
            Some(CacheEntry::Ready(page)) => Some(Arc::clone(page)),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
