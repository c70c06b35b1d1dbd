//! Time-bounded memo of search results, keyed by keyword and result count.
//!
//! Owned by the orchestrator, never by `SearchClient`, so a test can drive
//! the client without any caching in the way. Only successful responses are
//! stored.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::{clamp_display, Post};

/// Repeated identical searches within this window reuse the stored result.
pub const DEFAULT_SEARCH_TTL: Duration = Duration::from_secs(60 * 60);

struct CachedSearch {
    posts: Vec<Post>,
    fetched_at: Instant,
}

pub struct SearchCache {
    ttl: Duration,
    entries: HashMap<(String, u32), CachedSearch>,
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_TTL)
    }
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn key(keyword: &str, limit: u32) -> (String, u32) {
        (keyword.trim().to_string(), clamp_display(limit))
    }

    pub fn get(&self, keyword: &str, limit: u32) -> Option<&[Post]> {
        self.get_at(keyword, limit, Instant::now())
    }

    /// Lookup as of `now`; entries older than the TTL are treated as absent.
    pub fn get_at(&self, keyword: &str, limit: u32, now: Instant) -> Option<&[Post]> {
        self.entries
            .get(&Self::key(keyword, limit))
            .filter(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl)
            .map(|entry| entry.posts.as_slice())
    }

    pub fn insert(&mut self, keyword: &str, limit: u32, posts: Vec<Post>) {
        self.insert_at(keyword, limit, posts, Instant::now());
    }

    pub fn insert_at(&mut self, keyword: &str, limit: u32, posts: Vec<Post>, now: Instant) {
        self.evict_expired(now);
        self.entries.insert(
            Self::key(keyword, limit),
            CachedSearch {
                posts,
                fetched_at: now,
            },
        );
    }

    pub fn evict_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.fetched_at) < ttl);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn post(title: &str) -> Post {
        Post {
            title: title.into(),
            link: Url::parse("https://blog.naver.com/x/1").unwrap(),
            summary: String::new(),
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = SearchCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at("강남 맛집", 30, vec![post("a")], t0);

        let hit = cache.get_at("강남 맛집", 30, t0 + Duration::from_secs(59)).unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].title, "a");
    }

    #[test]
    fn test_miss_after_ttl() {
        let mut cache = SearchCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at("강남 맛집", 30, vec![post("a")], t0);
        assert!(cache.get_at("강남 맛집", 30, t0 + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn test_key_uses_trimmed_keyword_and_clamped_limit() {
        let mut cache = SearchCache::default();
        let t0 = Instant::now();
        cache.insert_at(" 강남 ", 500, vec![post("a")], t0);

        assert!(cache.get_at("강남", 100, t0).is_some());
        assert!(cache.get_at("강남", 30, t0).is_none());
        assert!(cache.get_at("서울", 100, t0).is_none());
    }

    #[test]
    fn test_insert_evicts_expired_entries() {
        let mut cache = SearchCache::new(Duration::from_secs(10));
        let t0 = Instant::now();
        cache.insert_at("a", 10, vec![], t0);
        cache.insert_at("b", 10, vec![], t0 + Duration::from_secs(11));
        assert_eq!(cache.len(), 1);
        assert!(cache.get_at("b", 10, t0 + Duration::from_secs(11)).is_some());
    }
}
