use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use lru::LruCache;
use parking_lot::RwLock;
use crate::search::page::{SearchPage, SearchRequest};

/// LRU cache of search pages keyed by the full request, so the same query
/// with a different window or total mode is a distinct entry.
pub struct SearchCache {
    cache: RwLock<LruCache<SearchRequest, SearchPage>>,
    capacity: usize,
    hit_count: AtomicUsize,
    miss_count: AtomicUsize,
}

impl SearchCache {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SearchCache {
            cache: RwLock::new(LruCache::new(cap)),
            capacity: cap.get(),
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, request: &SearchRequest) -> Option<SearchPage> {
        let mut cache = self.cache.write();
        if let Some(page) = cache.get(request) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            Some(page.clone())
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn put(&self, request: SearchRequest, page: SearchPage) {
        let mut cache = self.cache.write();
        cache.put(request, page);
    }

    /// Drop every entry, e.g. after the dataset file is replaced
    pub fn clear(&self) {
        let mut cache = self.cache.write();
        cache.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.cache.read().len(),
            capacity: self.capacity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::page::TotalMode;

    #[test]
    fn hit_after_put() {
        let cache = SearchCache::new(4);
        let request = SearchRequest::new("tokenize", 1, 10);
        assert!(cache.get(&request).is_none());

        cache.put(request.clone(), SearchPage::empty(1, 10));
        assert!(cache.get(&request).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }

    #[test]
    fn total_mode_is_part_of_the_key() {
        let cache = SearchCache::new(4);
        let exact = SearchRequest::new("tokenize", 1, 10);
        let at_least = exact.clone().with_total_mode(TotalMode::AtLeast);

        cache.put(exact, SearchPage::empty(1, 10));
        assert!(cache.get(&at_least).is_none());
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = SearchCache::new(1);
        let first = SearchRequest::new("a", 1, 10);
        let second = SearchRequest::new("b", 1, 10);

        cache.put(first.clone(), SearchPage::empty(1, 10));
        cache.put(second, SearchPage::empty(1, 10));
        assert!(cache.get(&first).is_none());
    }
}
