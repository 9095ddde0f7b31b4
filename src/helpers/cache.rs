//! In-process caches.
//!
//! `TtlCache` keeps values for a fixed time to live. The authentication
//! middleware uses it for resolved tokens. `PageCache` builds on it to keep
//! the JSON bodies of public read routes until their TTL runs out or a write
//! revalidates their path.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, Cached<V>>>,
}

struct Cached<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // expired, drop it unless someone refreshed it meanwhile
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at <= now {
                entries.remove(key);
            } else {
                return Some(entry.value.clone());
            }
        }

        None
    }

    pub async fn insert(&self, key: String, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        // keys that are never read again would otherwise stay forever
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            Cached {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Removes the entries whose key matches, returns how many were dropped.
    pub async fn remove_where<F>(&self, matches: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !matches(key));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Cached JSON bodies of public pages, keyed by path and query.
pub struct PageCache {
    pages: TtlCache<serde_json::Value>,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pages: TtlCache::new(ttl),
        }
    }

    pub fn key(path: &str, query: &str) -> String {
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }

    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.pages.get(key).await
    }

    pub async fn insert(&self, key: String, body: serde_json::Value) {
        self.pages.insert(key, body).await
    }

    /// Drops `path` along with everything below it and all its query variants.
    /// `/` is the home page only.
    #[tracing::instrument(name = "Revalidate path.", skip(self))]
    pub async fn revalidate(&self, path: &str) -> usize {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        let removed = self
            .pages
            .remove_where(|key| is_under(key, path))
            .await;
        tracing::debug!("revalidated {} cached page(s) under {}", removed, path);
        removed
    }

    pub async fn len(&self) -> usize {
        self.pages.len().await
    }
}

fn is_under(key: &str, path: &str) -> bool {
    if path == "/" {
        return key == "/" || key.starts_with("/?");
    }
    match key.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn ttl_cache_expires_entries() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.insert("token".to_string(), 1).await;
        assert_eq!(cache.get("token").await, Some(1));

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("token").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn zero_ttl_disables_cache() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert("token".to_string(), 1).await;
        assert_eq!(cache.get("token").await, None);
    }

    #[test]
    fn key_includes_query() {
        assert_eq!(PageCache::key("/products", ""), "/products");
        assert_eq!(
            PageCache::key("/products", "search=chair"),
            "/products?search=chair"
        );
    }

    #[tokio::test]
    async fn revalidate_drops_path_children_and_queries() {
        let cache = PageCache::new(Duration::from_secs(60));
        for key in [
            "/products",
            "/products?search=chair",
            "/products/featured",
            "/products/abc",
            "/products/abc/reviews",
            "/productsx",
            "/favorites",
        ] {
            cache.insert(key.to_string(), json!({"message": key})).await;
        }

        assert_eq!(cache.revalidate("/products/abc").await, 2);
        assert!(cache.get("/products/abc/reviews").await.is_none());
        assert!(cache.get("/products").await.is_some());

        assert_eq!(cache.revalidate("/products/").await, 3);
        assert!(cache.get("/productsx").await.is_some());
        assert!(cache.get("/favorites").await.is_some());
    }

    #[tokio::test]
    async fn revalidate_root_drops_home_page_only() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.insert("/".to_string(), json!(0)).await;
        cache.insert("/?tab=new".to_string(), json!(1)).await;
        cache.insert("/products".to_string(), json!(2)).await;
        cache.insert("/favorites".to_string(), json!(3)).await;

        assert_eq!(cache.revalidate("/").await, 2);
        assert_eq!(cache.len().await, 2);
        assert!(cache.get("/products").await.is_some());
    }

    #[tokio::test]
    async fn expired_entries_are_swept_on_insert() {
        let cache = TtlCache::new(Duration::from_millis(200));
        for i in 0..200 {
            cache.insert(format!("/products?search={}", i), i).await;
        }
        assert_eq!(cache.len().await, 200);

        tokio::time::sleep(Duration::from_millis(300)).await;
        cache.insert("/products?search=last".to_string(), 0).await;
        assert_eq!(cache.len().await, 1);
    }
}
