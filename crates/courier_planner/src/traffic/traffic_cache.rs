use fxhash::FxHashMap;
use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;

use crate::{problem::location::Location, traffic::traffic_sample::TrafficSample};

/// Origin and destination rounded to 3 decimal degrees (~111m) so that
/// near-identical queries share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrafficKey {
    from: (i64, i64),
    to: (i64, i64),
}

impl TrafficKey {
    pub fn new(from: &Location, to: &Location) -> Self {
        Self {
            from: (round_coordinate(from.lat()), round_coordinate(from.lon())),
            to: (round_coordinate(to.lat()), round_coordinate(to.lon())),
        }
    }
}

fn round_coordinate(value: f64) -> i64 {
    (value * 1000.0).round() as i64
}

pub trait TrafficCache: Send + Sync {
    /// The sample stored for `key` if it is still fresh at `now`.
    fn get(&self, key: &TrafficKey, now: Timestamp) -> Option<TrafficSample>;

    /// Stores `sample`, replacing any previous entry for `key`.
    fn insert(&self, key: TrafficKey, sample: TrafficSample, now: Timestamp);
}

struct CachedSample {
    sample: TrafficSample,
    cached_at: Timestamp,
}

pub const DEFAULT_CAPACITY: usize = 1000;

/// Keeps at most `capacity` entries. A full cache first drops stale entries,
/// then the oldest one.
pub struct InMemoryTrafficCache {
    freshness: SignedDuration,
    capacity: usize,
    entries: RwLock<FxHashMap<TrafficKey, CachedSample>>,
}

impl InMemoryTrafficCache {
    pub fn new(freshness: SignedDuration) -> Self {
        Self::with_capacity(freshness, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(freshness: SignedDuration, capacity: usize) -> Self {
        Self {
            freshness,
            capacity: capacity.max(1),
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for InMemoryTrafficCache {
    fn default() -> Self {
        Self::new(SignedDuration::from_mins(5))
    }
}

impl TrafficCache for InMemoryTrafficCache {
    fn get(&self, key: &TrafficKey, now: Timestamp) -> Option<TrafficSample> {
        let entries = self.entries.read();
        let cached = entries.get(key)?;

        if now.duration_since(cached.cached_at) < self.freshness {
            Some(cached.sample)
        } else {
            None
        }
    }

    fn insert(&self, key: TrafficKey, sample: TrafficSample, now: Timestamp) {
        let mut entries = self.entries.write();

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            entries.retain(|_, cached| now.duration_since(cached.cached_at) < self.freshness);

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, cached)| cached.cached_at)
                    .map(|(key, _)| *key);
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CachedSample {
                sample,
                cached_at: now,
            },
        );
    }
}
