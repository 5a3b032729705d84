//! Токены сессии в localStorage.

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "ledger.access_token";
const REFRESH_TOKEN_KEY: &str = "ledger.refresh_token";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|v| !v.is_empty())
}

fn write(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("Cannot write {} to localStorage", key);
        }
    }
}

/// Store both tokens after a successful login.
pub fn save_tokens(access_token: &str, refresh_token: &str) {
    write(ACCESS_TOKEN_KEY, access_token);
    write(REFRESH_TOKEN_KEY, refresh_token);
}

/// Replace the access token after a refresh.
pub fn save_access_token(token: &str) {
    write(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token() -> Option<String> {
    read(REFRESH_TOKEN_KEY)
}

pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
