//! Кэш с ревалидацией по ключу (аналог SWR).
//!
//! `RevalidationCache` is provided once at the application root; forms
//! invalidate keys after a mutation and every [`use_cached`] view of that key
//! refetches.

mod hook;
mod store;

pub use hook::{use_cached, CachedResource};
pub use store::{Listener, RevalidationCache, Subscription};

use leptos::prelude::*;

/// Theme preference, mirrored from local storage.
pub const THEME_KEY: &str = "/state/theme";
/// Commodity list; invalidated after a commodity is created.
pub const COMMODITIES_KEY: &str = "/api/commodities";

pub fn provide_cache() -> RevalidationCache {
    let cache = RevalidationCache::new();
    provide_context(cache.clone());
    cache
}

pub fn use_cache() -> RevalidationCache {
    use_context::<RevalidationCache>().expect("RevalidationCache not provided. Call provide_cache() in App.")
}
