//! Session-scoped segmentation cache.
//!
//! An explicit cache object the embedding layer injects into the editor
//! session, replacing the module-singleton cache of the original
//! implementation: no hidden cross-session or cross-test state. Entries
//! are keyed by image id and expire after a TTL.

use std::collections::HashMap;
use std::time::Duration;

use web_time::Instant;

use crate::model::SegmentationData;

/// Configuration for the segmentation cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long an entry stays valid after being stored.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(crate::constants::cache::TTL_SECONDS),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: SegmentationData,
    stored_at: Instant,
}

/// Segmentation cache keyed by image id, with timestamp-based expiry.
#[derive(Debug, Default)]
pub struct SegmentationCache {
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
}

impl SegmentationCache {
    /// Create a cache with the default TTL.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
        }
    }

    /// Get the cached segmentation for an image, if present and fresh.
    /// Expired entries are evicted on access.
    pub fn get(&mut self, image_id: &str) -> Option<&SegmentationData> {
        let expired = match self.entries.get(image_id) {
            Some(entry) => entry.stored_at.elapsed() > self.config.ttl,
            None => return None,
        };
        if expired {
            log::debug!("cache entry for '{image_id}' expired");
            self.entries.remove(image_id);
            return None;
        }
        self.entries.get(image_id).map(|e| &e.data)
    }

    /// Store the segmentation for an image, replacing any previous entry.
    pub fn set(&mut self, image_id: impl Into<String>, data: SegmentationData) {
        self.entries.insert(
            image_id.into(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for one image.
    pub fn invalidate(&mut self, image_id: &str) {
        if self.entries.remove(image_id).is_some() {
            log::debug!("cache entry for '{image_id}' invalidated");
        }
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries currently stored (including not-yet-evicted
    /// expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SegmentationData {
        SegmentationData::new(64, 64)
    }

    #[test]
    fn test_set_get() {
        let mut cache = SegmentationCache::new();
        assert!(cache.get("img-1").is_none());

        cache.set("img-1", sample());
        assert!(cache.get("img-1").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = SegmentationCache::new();
        cache.set("img-1", sample());
        cache.invalidate("img-1");
        assert!(cache.get("img-1").is_none());
        // Invalidating a missing key is fine.
        cache.invalidate("img-2");
    }

    #[test]
    fn test_clear() {
        let mut cache = SegmentationCache::new();
        cache.set("img-1", sample());
        cache.set("img-2", sample());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let mut cache = SegmentationCache::with_config(CacheConfig {
            ttl: Duration::from_secs(0),
        });
        cache.set("img-1", sample());
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("img-1").is_none());
        // The expired entry was evicted on access.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_replaces_entry() {
        let mut cache = SegmentationCache::new();
        cache.set("img-1", sample());
        let mut updated = sample();
        updated.image_width = 128;
        cache.set("img-1", updated);
        assert_eq!(cache.get("img-1").unwrap().image_width, 128);
        assert_eq!(cache.len(), 1);
    }
}
