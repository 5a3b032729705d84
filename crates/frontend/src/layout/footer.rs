use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::shared::api_utils::api_url;

const PING_INTERVAL_MS: u32 = 30_000;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ServerStatus {
    Online,
    Offline,
    Checking,
}

impl ServerStatus {
    fn display_text(&self) -> &'static str {
        match self {
            ServerStatus::Online => "Server: online",
            ServerStatus::Offline => "Server: offline",
            ServerStatus::Checking => "Server: checking...",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online => "status-online",
            ServerStatus::Offline => "status-offline",
            ServerStatus::Checking => "status-checking",
        }
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let status = RwSignal::new(ServerStatus::Checking);
    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    // Пинг сервера при монтировании и затем периодически
    spawn_local(async move {
        while alive.load(Ordering::Relaxed) {
            let next = if ping_server().await {
                ServerStatus::Online
            } else {
                ServerStatus::Offline
            };
            if !alive.load(Ordering::Relaxed) {
                break;
            }
            status.set(next);
            TimeoutFuture::new(PING_INTERVAL_MS).await;
        }
    });

    view! {
        <footer data-zone="footer" class="status-bar">
            <span class=move || status.get().css_class()>
                {move || status.get().display_text()}
            </span>
        </footer>
    }
}

async fn ping_server() -> bool {
    match Request::get(&api_url("/health")).send().await {
        Ok(response) => response.ok(),
        Err(_) => false,
    }
}
