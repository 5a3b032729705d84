use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Called with the new value of a key; `None` after invalidation.
pub type Listener = Arc<dyn Fn(Option<Value>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Value>,
    listeners: HashMap<String, Vec<(u64, Listener)>>,
    next_id: u64,
}

/// Кэш с ревалидацией: значения по строковому ключу и подписчики на изменения.
///
/// Cloning is cheap and every clone sees the same entries. A writer that changes
/// a key notifies that key's subscribers after the lock is released, so a
/// listener may read or write the cache itself.
#[derive(Clone, Default)]
pub struct RevalidationCache {
    inner: Arc<Mutex<Inner>>,
}

impl RevalidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking listener never runs under the lock, so poisoning leaves the map consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().entries.get(key).cloned()
    }

    /// Typed read; a value that does not decode as `T` reads as absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Write (`Some`) or clear (`None`) a key and notify its subscribers.
    pub fn mutate(&self, key: &str, value: Option<Value>) {
        let listeners = {
            let mut inner = self.lock();
            match &value {
                Some(v) => {
                    inner.entries.insert(key.to_string(), v.clone());
                }
                None => {
                    inner.entries.remove(key);
                }
            }
            Self::listeners_of(&inner, key)
        };
        for listener in listeners {
            listener(value.clone());
        }
    }

    /// Typed write. Values that fail to serialize are logged and dropped.
    pub fn mutate_with<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => self.mutate(key, Some(v)),
            Err(e) => log::error!("cache: cannot serialize value for {}: {}", key, e),
        }
    }

    /// Drop the cached value so subscribers refetch.
    pub fn invalidate(&self, key: &str) {
        log::debug!("cache: invalidate {}", key);
        self.mutate(key, None);
    }

    /// Listen to changes of `key` until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        key: &str,
        listener: impl Fn(Option<Value>) + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .listeners
            .entry(key.to_string())
            .or_default()
            .push((id, Arc::new(listener)));

        Subscription {
            cache: Arc::downgrade(&self.inner),
            key: key.to_string(),
            id,
        }
    }

    pub fn subscriber_count(&self, key: &str) -> usize {
        self.lock().listeners.get(key).map_or(0, Vec::len)
    }

    fn listeners_of(inner: &Inner, key: &str) -> Vec<Listener> {
        inner
            .listeners
            .get(key)
            .map(|list| list.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default()
    }
}

/// Handle returned by [`RevalidationCache::subscribe`]; unsubscribes on drop.
pub struct Subscription {
    cache: Weak<Mutex<Inner>>,
    key: String,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.cache.upgrade() else {
            return;
        };
        let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(list) = inner.listeners.get_mut(&self.key) {
            list.retain(|(id, _)| *id != self.id);
            if list.is_empty() {
                inner.listeners.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_mutate_and_get() {
        let cache = RevalidationCache::new();
        assert_eq!(cache.get("/api/commodities"), None);

        cache.mutate("/api/commodities", Some(json!(["EUR"])));
        assert_eq!(cache.get("/api/commodities"), Some(json!(["EUR"])));
        assert_eq!(
            cache.get_as::<Vec<String>>("/api/commodities"),
            Some(vec!["EUR".to_string()])
        );

        cache.mutate("/api/commodities", None);
        assert_eq!(cache.get("/api/commodities"), None);
    }

    #[test]
    fn test_get_as_wrong_type_is_none() {
        let cache = RevalidationCache::new();
        cache.mutate_with("/state/theme", &"dark");
        assert_eq!(cache.get_as::<u32>("/state/theme"), None);
        assert_eq!(cache.get_as::<String>("/state/theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_invalidate_notifies_only_that_key() {
        let cache = RevalidationCache::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let h = hits.clone();
        let s = seen.clone();
        let _sub = cache.subscribe("/api/commodities", move |v| {
            h.fetch_add(1, Ordering::SeqCst);
            s.lock().unwrap().push(v);
        });

        cache.mutate("/api/commodities", Some(json!([])));
        cache.mutate("/state/theme", Some(json!("dark")));
        cache.invalidate("/api/commodities");

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.lock().unwrap(), vec![Some(json!([])), None]);
        assert_eq!(cache.get("/state/theme"), Some(json!("dark")));
    }

    #[test]
    fn test_drop_subscription_unsubscribes() {
        let cache = RevalidationCache::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        let sub = cache.subscribe("k", move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(cache.subscriber_count("k"), 1);

        cache.invalidate("k");
        drop(sub);
        cache.invalidate("k");

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(cache.subscriber_count("k"), 0);
    }

    #[test]
    fn test_listener_can_write_back() {
        // Refetch-on-invalidate: the listener repopulates the key it was told about.
        let cache = RevalidationCache::new();
        let writer = cache.clone();
        let _sub = cache.subscribe("/state/theme", move |v| {
            if v.is_none() {
                writer.mutate_with("/state/theme", &"light");
            }
        });

        cache.invalidate("/state/theme");
        assert_eq!(cache.get_as::<String>("/state/theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_subscription_outlives_cache() {
        let cache = RevalidationCache::new();
        let sub = cache.subscribe("k", |_| {});
        drop(cache);
        drop(sub);
    }
}
