//! Keyed query store backing every list the discussion view reads.
//!
//! Each key owns one entry holding the last applied state, the last read
//! failure and a revision that only moves when either of them changes.
//! Requests are tagged with a per-key sequence number so the store can
//! decide which response wins when two overlap.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

/// Rule applied when two responses for the same key overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Consistency {
    /// Whichever response resolves last is applied, even if it was issued first.
    #[default]
    LastResponse,
    /// Responses older than the last applied one are discarded.
    LatestRequest,
}

impl FromStr for Consistency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-response" => Ok(Self::LastResponse),
            "latest-request" => Ok(Self::LatestRequest),
            other => Err(format!("unknown cache consistency: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<V> {
    Loading,
    Error(String),
    Data(V),
}

impl<V> QueryState<V> {
    pub const fn data(&self) -> Option<&V> {
        match self {
            Self::Data(v) => Some(v),
            Self::Loading | Self::Error(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Error(String),
    Success,
}

impl MutationState {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(e) => Some(e),
            Self::Idle | Self::Pending | Self::Success => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Snapshot<V> {
    pub state: QueryState<V>,
    /// Last read failure, kept next to cached data until a read succeeds.
    pub error: Option<String>,
    pub revision: u64,
}

struct Entry<V> {
    state: QueryState<V>,
    error: Option<String>,
    revision: u64,
    issued: u64,
    applied: u64,
}

impl<V> Entry<V> {
    const fn new() -> Self {
        Self {
            state: QueryState::Loading,
            error: None,
            revision: 0,
            issued: 0,
            applied: 0,
        }
    }
}

/// Handle for one in-flight request against a key.
#[derive(Debug)]
pub struct Ticket<K> {
    key: K,
    sequence: u64,
}

pub struct Store<K, V> {
    entries: Arc<Mutex<HashMap<K, Entry<V>>>>,
    consistency: Consistency,
}

impl<K, V> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            consistency: self.consistency,
        }
    }
}

impl<K, V> Store<K, V>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
    V: Clone + PartialEq,
{
    pub fn new(consistency: Consistency) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            consistency,
        }
    }

    pub fn begin(&self, key: &K) -> Ticket<K> {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.issued += 1;

        Ticket {
            key: key.clone(),
            sequence: entry.issued,
        }
    }

    /// Applies a response. Returns `false` when the response was discarded.
    pub fn resolve(&self, ticket: Ticket<K>, result: Result<V, String>) -> bool {
        let Ticket { key, sequence } = ticket;

        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);

        if self.consistency == Consistency::LatestRequest && sequence < entry.applied {
            debug!(
                "discarding stale response #{sequence} for {key:?}, #{} already applied",
                entry.applied
            );
            return false;
        }
        entry.applied = sequence;

        let (changed, error) = match result {
            Ok(value) => {
                if entry.state.data() == Some(&value) {
                    (false, None)
                } else {
                    entry.state = QueryState::Data(value);
                    (true, None)
                }
            }
            Err(e) => {
                warn!("request #{sequence} for {key:?} failed: {e}");
                let keep = match &entry.state {
                    QueryState::Data(_) => true,
                    QueryState::Error(prev) => prev == &e,
                    QueryState::Loading => false,
                };
                if !keep {
                    entry.state = QueryState::Error(e.clone());
                }
                (!keep, Some(e))
            }
        };

        if changed || entry.error != error {
            entry.revision += 1;
        }
        entry.error = error;

        true
    }

    pub async fn fetch<F>(&self, key: &K, request: F) -> bool
    where
        F: Future<Output = Result<V, String>>,
    {
        let ticket = self.begin(key);
        let result = request.await;
        self.resolve(ticket, result)
    }

    pub fn snapshot(&self, key: &K) -> Option<Snapshot<V>> {
        self.lock().get(key).map(|e| Snapshot {
            state: e.state.clone(),
            error: e.error.clone(),
            revision: e.revision,
        })
    }

    pub fn state(&self, key: &K) -> QueryState<V> {
        self.lock()
            .get(key)
            .map(|e| e.state.clone())
            .unwrap_or(QueryState::Loading)
    }

    pub fn is_cached(&self, key: &K) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|e| e.state.data().is_some())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
