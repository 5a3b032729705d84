//! Theme management module for the application.
//!
//! The preference lives in localStorage under `theme` and is mirrored into the
//! revalidation cache under [`THEME_KEY`]. Dark mode is marked by the `dark`
//! class on `<html>`.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::shared::cache::{use_cache, RevalidationCache, THEME_KEY};
use crate::shared::icons::icon;

/// Available themes in the application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the theme name as stored in localStorage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Class put on the document root; light has none.
    pub fn marker_class(self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some(DARK_CLASS),
            Theme::Light => None,
        }
    }
}

pub const THEME_STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

/// A stored preference wins; otherwise follow the system, defaulting to dark.
pub fn resolve(stored: Option<&str>, system_prefers_light: bool) -> Theme {
    stored
        .and_then(Theme::parse)
        .unwrap_or(if system_prefers_light {
            Theme::Light
        } else {
            Theme::Dark
        })
}

/// Theme from the cache, or resolved from the stored value and cached.
pub fn load_theme(cache: &RevalidationCache, stored: Option<&str>, system_prefers_light: bool) -> Theme {
    if let Some(theme) = cache.get_as::<Theme>(THEME_KEY) {
        return theme;
    }
    let theme = resolve(stored, system_prefers_light);
    cache.mutate_with(THEME_KEY, &theme);
    theme
}

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Load theme from localStorage.
fn stored_theme() -> Option<String> {
    local_storage()?.get_item(THEME_STORAGE_KEY).ok()?
}

/// Save theme to localStorage.
fn save_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

fn system_prefers_light() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: light)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

fn load_from_browser(cache: &RevalidationCache) -> Theme {
    load_theme(cache, stored_theme().as_deref(), system_prefers_light())
}

/// Put or remove the `dark` class on `<html>`.
pub fn apply_theme(theme: Theme) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = root
        .class_list()
        .toggle_with_force(DARK_CLASS, theme.marker_class().is_some());
}

/// Theme context type.
#[derive(Clone)]
pub struct ThemeContext {
    /// Current theme signal, follows the cache entry.
    pub theme: RwSignal<Theme>,
    cache: RevalidationCache,
}

impl ThemeContext {
    /// Persist the theme and publish it through the cache.
    pub fn set_theme(&self, theme: Theme) {
        save_theme(theme);
        self.cache.mutate_with(THEME_KEY, &theme);
        apply_theme(theme);
    }

    pub fn toggle(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let cache = use_cache();
    let theme = RwSignal::new(load_from_browser(&cache));

    let reload = cache.clone();
    let subscription = cache.subscribe(THEME_KEY, move |value| {
        match value.and_then(|v| serde_json::from_value::<Theme>(v).ok()) {
            Some(t) => theme.set(t),
            // Invalidated: read storage again
            None => theme.set(load_from_browser(&reload)),
        }
    });
    on_cleanup(move || drop(subscription));

    provide_context(ThemeContext { theme, cache });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

/// Dark/light switch for the top bar.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();
    let theme = ctx.theme;

    view! {
        <button
            class="top-header__icon-btn"
            title="Toggle theme"
            on:click=move |_| ctx.toggle()
        >
            {move || match theme.get() {
                Theme::Dark => icon("sun"),
                Theme::Light => icon("moon"),
            }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_value_wins_over_system() {
        assert_eq!(resolve(Some("light"), false), Theme::Light);
        assert_eq!(resolve(Some("dark"), true), Theme::Dark);
    }

    #[test]
    fn test_system_default() {
        assert_eq!(resolve(None, true), Theme::Light);
        assert_eq!(resolve(None, false), Theme::Dark);
        assert_eq!(resolve(Some("forest"), true), Theme::Light);
    }

    #[test]
    fn test_marker_class() {
        assert_eq!(resolve(None, false).marker_class(), Some("dark"));
        assert_eq!(resolve(Some("light"), false).marker_class(), None);
    }

    #[test]
    fn test_cached_theme_beats_storage() {
        let cache = RevalidationCache::new();
        cache.mutate_with(THEME_KEY, &Theme::Light);
        assert_eq!(load_theme(&cache, Some("dark"), false), Theme::Light);
    }

    #[test]
    fn test_invalidate_round_trip() {
        let cache = RevalidationCache::new();
        let first = load_theme(&cache, Some("light"), false);
        assert_eq!(cache.get_as::<Theme>(THEME_KEY), Some(Theme::Light));

        cache.invalidate(THEME_KEY);
        assert_eq!(cache.get(THEME_KEY), None);

        let again = load_theme(&cache, Some("light"), false);
        assert_eq!(again, first);
        assert_eq!(again.marker_class(), first.marker_class());
    }

    #[test]
    fn test_serde_names_match_storage() {
        assert_eq!(serde_json::to_value(Theme::Dark).unwrap(), "dark");
        assert_eq!(
            serde_json::from_value::<Theme>(serde_json::json!("light")).unwrap(),
            Theme::Light
        );
    }
}
