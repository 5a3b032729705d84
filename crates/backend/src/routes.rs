use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    // Book data requires a bearer token
    let book = Router::new()
        .route(
            "/api/commodities",
            get(handlers::a001_commodity::list_all).post(handlers::a001_commodity::create),
        )
        .route("/api/accounts", get(handlers::a003_account::list_all))
        .route("/api/prices", get(handlers::queries::get_prices))
        .route("/api/splits/:account", get(handlers::queries::get_splits))
        .route("/api/monthly-totals", get(handlers::queries::get_monthly_totals))
        .route("/api/main-currency", get(handlers::queries::get_main_currency))
        .route("/api/earliest-date", get(handlers::queries::get_earliest_date))
        .route("/api/txs/latest", get(handlers::queries::get_latest_txs))
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user),
        )
        .layer(middleware::from_fn(system::auth::middleware::require_auth));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/book/status", get(handlers::book::status))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .merge(book)
}
