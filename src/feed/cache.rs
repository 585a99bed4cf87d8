// Per-symbol payload cache with a fixed TTL and oldest-first eviction

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::ChartPayload;

const MAX_ENTRIES: usize = 32;

#[derive(Debug, Clone)]
struct CachedPayload {
    payload: ChartPayload,
    cached_at: Instant,
}

#[derive(Debug)]
pub struct ChartCache {
    entries: HashMap<String, CachedPayload>,
    ttl: Duration,
    max_entries: usize,
}

impl ChartCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries: MAX_ENTRIES,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&ChartPayload> {
        self.entries
            .get(symbol)
            .filter(|cached| cached.cached_at.elapsed() < self.ttl)
            .map(|cached| &cached.payload)
    }

    pub fn insert(&mut self, symbol: &str, payload: ChartPayload) {
        if self.ttl.is_zero() {
            return;
        }
        if !self.entries.contains_key(symbol) && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.find_oldest_key() {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            symbol.to_string(),
            CachedPayload {
                payload,
                cached_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn find_oldest_key(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, cached)| cached.cached_at)
            .map(|(key, _)| key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = ChartCache::new(Duration::from_secs(60));
        cache.insert("AAPL", ChartPayload::default());
        assert!(cache.get("AAPL").is_some());
        assert!(cache.get("MSFT").is_none());
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let mut cache = ChartCache::new(Duration::ZERO);
        cache.insert("AAPL", ChartPayload::default());
        assert!(cache.is_empty());
        assert!(cache.get("AAPL").is_none());
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut cache = ChartCache::new(Duration::from_secs(60));
        for i in 0..MAX_ENTRIES {
            cache.insert(&format!("SYM{}", i), ChartPayload::default());
        }
        cache.insert("LATE", ChartPayload::default());

        assert_eq!(cache.len(), MAX_ENTRIES);
        assert!(cache.get("LATE").is_some());
    }
}
