use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

use super::{use_cache, RevalidationCache};

/// Reactive view of one cache key.
pub struct CachedResource<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
}

// Signals are handles, so the resource is Copy whatever `T` is.
impl<T: Send + Sync + 'static> Clone for CachedResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for CachedResource<T> {}

impl<T: Send + Sync + 'static> CachedResource<T> {
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }
}

/// Expose `key` as a reactive resource backed by `fetcher`.
///
/// Fetches when the key is empty, refetches after [`RevalidationCache::invalidate`]
/// and writes every result back into the cache so other readers of the key see it.
pub fn use_cached<T, F, Fut>(key: &'static str, fetcher: F) -> CachedResource<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let cache = use_cache();
    let resource = CachedResource {
        data: RwSignal::new(cache.get_as::<T>(key)),
        error: RwSignal::new(None),
        loading: RwSignal::new(false),
    };

    let data = resource.data;
    let subscription = cache.subscribe(key, move |value| {
        data.set(value.and_then(|v| serde_json::from_value(v).ok()));
    });
    on_cleanup(move || drop(subscription));

    Effect::new(move |_| {
        if data.with(Option::is_some) || resource.loading.get_untracked() {
            return;
        }
        fetch_into(cache.clone(), key, fetcher(), resource);
    });

    resource
}

fn fetch_into<T, Fut>(cache: RevalidationCache, key: &'static str, fut: Fut, resource: CachedResource<T>)
where
    T: Serialize + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    resource.loading.set(true);
    spawn_local(async move {
        match fut.await {
            Ok(value) => {
                resource.error.set(None);
                resource.loading.set(false);
                // Subscribers, including this resource, pick the value up from the cache.
                cache.mutate_with(key, &value);
            }
            Err(e) => {
                log::warn!("cache: fetch of {} failed: {}", key, e);
                resource.error.set(Some(e));
                resource.loading.set(false);
            }
        }
    });
}
