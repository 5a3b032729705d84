//! Провайдер источника данных: ждёт, пока бэкенд откроет книгу.

use contracts::system::book::BookStatus;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::api_url;

const POLL_INTERVAL_MS: u32 = 2_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataSource {
    pub is_loaded: bool,
}

#[derive(Clone, Copy)]
struct DataSourceContext {
    is_loaded: ReadSignal<bool>,
}

async fn fetch_status() -> Result<BookStatus, String> {
    let response = Request::get(&api_url("/api/book/status"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Book status failed: {}", response.status()));
    }

    response
        .json::<BookStatus>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Polls the book status until the backend reports it loaded.
#[component]
pub fn DataSourceProvider(children: Children) -> impl IntoView {
    let (is_loaded, set_is_loaded) = signal(false);

    spawn_local(async move {
        loop {
            match fetch_status().await {
                Ok(BookStatus { loaded: true }) => {
                    log::info!("Book loaded");
                    set_is_loaded.set(true);
                    break;
                }
                Ok(_) => log::debug!("Book not loaded yet"),
                Err(e) => log::warn!("{}", e),
            }
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
        }
    });

    provide_context(DataSourceContext { is_loaded });

    children()
}

/// Reactive `{ is_loaded }`.
pub fn use_data_source() -> Signal<DataSource> {
    let ctx = use_context::<DataSourceContext>()
        .expect("DataSourceProvider not found in component tree");
    Signal::derive(move || DataSource {
        is_loaded: ctx.is_loaded.get(),
    })
}
