use std::time::Duration;

use chrono::{DateTime, Utc};

/// Longest finite TTL the cache is tuned for (30 days).
///
/// Larger finite values are still honoured, but entries meant to live that
/// long should use [`Ttl::Infinite`] so the store can reclaim them.
pub const MAX_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Validity window of a cache entry, measured from its write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Entry expires once this much time has passed since the write.
    Finite(Duration),
    /// Entry never expires logically.
    Infinite,
}

impl Ttl {
    pub fn from_millis(ms: u64) -> Self {
        Ttl::Finite(Duration::from_millis(ms))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Ttl::Infinite)
    }

    /// Whether this is a finite TTL above [`MAX_TTL`].
    pub fn exceeds_max(&self) -> bool {
        match self {
            Ttl::Finite(d) => *d > MAX_TTL,
            Ttl::Infinite => false,
        }
    }
}

impl From<Duration> for Ttl {
    fn from(d: Duration) -> Self {
        Ttl::Finite(d)
    }
}

/// A cached value together with its TTL bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub payload: serde_json::Value,
    /// `None` means the entry was written without a TTL and is always live.
    pub ttl: Option<Ttl>,
    /// When the entry was last written. Entries stored by older writers may lack it.
    pub written_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(key: impl Into<String>, payload: serde_json::Value, ttl: Option<Ttl>) -> Self {
        Self {
            key: key.into(),
            payload,
            ttl,
            written_at: Some(Utc::now()),
        }
    }

    /// Instant after which the entry is no longer live.
    ///
    /// `None` when the entry never expires, or when a finite TTL has no
    /// write stamp to count from.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match (self.ttl, self.written_at) {
            (Some(Ttl::Finite(ttl)), Some(written_at)) => {
                let ttl = chrono::Duration::from_std(ttl).ok()?;
                written_at.checked_add_signed(ttl)
            }
            _ => None,
        }
    }

    /// Liveness at `now`. A finite TTL without a write stamp is never live.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        match (self.ttl, self.written_at) {
            (None, _) | (Some(Ttl::Infinite), _) => true,
            (Some(Ttl::Finite(_)), None) => false,
            // Past chrono's range the window has not elapsed.
            (Some(Ttl::Finite(_)), Some(_)) => self.expires_at().is_none_or(|exp| now < exp),
        }
    }

    pub fn is_live(&self) -> bool {
        self.is_live_at(Utc::now())
    }
}
