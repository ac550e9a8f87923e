//! Single-entry TTL cache holding the latest market listing.
//!
//! The cache stores exactly one snapshot. A snapshot is replaced wholesale
//! after every successful upstream fetch; entries are never merged.
//! Readers receive an `Arc` to an immutable vector, so a reader never sees
//! a mix of two fetches.
//!
//! Concurrent misses are not coalesced: every caller that finds the cache
//! stale performs its own upstream call and the last writer wins.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::models::MarketRecord;

/// Immutable, shareable market listing.
pub type MarketSnapshot = Arc<Vec<MarketRecord>>;

/// Default freshness window: one minute.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60);

/// What to do when a refresh fails while an older snapshot exists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StalePolicy {
    /// Propagate the upstream error; the old snapshot is never served once stale.
    #[default]
    FailHard,
    /// Serve the previous non-empty snapshot and log a warning.
    ServeStale,
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "fail-hard" | "fail_hard" => Ok(Self::FailHard),
            "serve-stale" | "serve_stale" | "stale" => Ok(Self::ServeStale),
            other => Err(format!("Unknown stale policy: {}", other)),
        }
    }
}

/// One complete upstream listing and the moment it was fetched.
#[derive(Clone, Debug)]
pub struct CachedMarketSnapshot {
    entries: MarketSnapshot,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

impl CachedMarketSnapshot {
    fn new(entries: Vec<MarketRecord>) -> Self {
        Self {
            entries: Arc::new(entries),
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        }
    }

    /// The cached records.
    pub fn entries(&self) -> &MarketSnapshot {
        &self.entries
    }

    /// Wall-clock time of the fetch, for display.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at_utc
    }

    /// Time elapsed since the fetch.
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    fn is_fresh(&self, window: Duration) -> bool {
        !self.entries.is_empty() && self.age() < window
    }
}

/// Process-wide holder of the latest [`CachedMarketSnapshot`].
///
/// Constructed once at startup and shared by handle; there is no global.
#[derive(Debug)]
pub struct SnapshotCache {
    current: RwLock<Option<CachedMarketSnapshot>>,
    freshness_window: Duration,
}

impl SnapshotCache {
    /// Create an empty cache with the given freshness window.
    pub fn new(freshness_window: Duration) -> Self {
        Self {
            current: RwLock::new(None),
            freshness_window,
        }
    }

    /// The configured freshness window.
    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// The cached records if they are non-empty and younger than the window.
    pub async fn fresh(&self) -> Option<MarketSnapshot> {
        let guard = self.current.read().await;
        guard
            .as_ref()
            .filter(|snapshot| snapshot.is_fresh(self.freshness_window))
            .map(|snapshot| Arc::clone(&snapshot.entries))
    }

    /// The last non-empty snapshot regardless of age.
    pub async fn last_known(&self) -> Option<MarketSnapshot> {
        let guard = self.current.read().await;
        guard
            .as_ref()
            .filter(|snapshot| !snapshot.entries.is_empty())
            .map(|snapshot| Arc::clone(&snapshot.entries))
    }

    /// Replace the snapshot wholesale and return the new shared listing.
    pub async fn replace(&self, entries: Vec<MarketRecord>) -> MarketSnapshot {
        let snapshot = CachedMarketSnapshot::new(entries);
        let shared = Arc::clone(&snapshot.entries);

        debug!("Market snapshot replaced with {} records", shared.len());
        *self.current.write().await = Some(snapshot);

        shared
    }

    /// A copy of the current snapshot metadata, if any fetch has succeeded.
    pub async fn current(&self) -> Option<CachedMarketSnapshot> {
        self.current.read().await.clone()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_WINDOW)
    }
}
