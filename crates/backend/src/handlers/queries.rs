use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d400_monthly_totals::{
    EarliestDateResponse, LatestTransactions, MainCurrencyResponse, MonthlyTotals,
};
use contracts::domain::a002_price::aggregate::{Price, PriceFilter};
use contracts::domain::a003_account::aggregate::AccountId;
use contracts::domain::a004_transaction::aggregate::AccountSplit;
use contracts::domain::common::AggregateId;

use crate::queries;

fn internal_error(query: &str, e: anyhow::Error) -> StatusCode {
    tracing::error!("Query {} failed: {}", query, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// GET /api/prices?from=&to=
pub async fn get_prices(Query(filter): Query<PriceFilter>) -> Result<Json<Vec<Price>>, StatusCode> {
    queries::get_prices(filter)
        .await
        .map(Json)
        .map_err(|e| internal_error("get_prices", e))
}

/// GET /api/splits/:account
pub async fn get_splits(Path(account): Path<String>) -> Result<Json<Vec<AccountSplit>>, StatusCode> {
    let account = AccountId::from_string(&account).map_err(|_| StatusCode::BAD_REQUEST)?;
    queries::get_splits(account)
        .await
        .map(Json)
        .map_err(|e| internal_error("get_splits", e))
}

/// GET /api/monthly-totals
pub async fn get_monthly_totals() -> Result<Json<MonthlyTotals>, StatusCode> {
    queries::get_monthly_totals()
        .await
        .map(Json)
        .map_err(|e| internal_error("get_monthly_totals", e))
}

/// GET /api/main-currency
pub async fn get_main_currency() -> Result<Json<MainCurrencyResponse>, StatusCode> {
    queries::get_main_currency()
        .await
        .map(|commodity| Json(MainCurrencyResponse { commodity }))
        .map_err(|e| internal_error("get_main_currency", e))
}

/// GET /api/earliest-date
pub async fn get_earliest_date() -> Result<Json<EarliestDateResponse>, StatusCode> {
    queries::get_earliest_date()
        .await
        .map(|date| Json(EarliestDateResponse { date }))
        .map_err(|e| internal_error("get_earliest_date", e))
}

/// GET /api/txs/latest
pub async fn get_latest_txs() -> Result<Json<LatestTransactions>, StatusCode> {
    queries::get_latest_txs()
        .await
        .map(Json)
        .map_err(|e| internal_error("get_latest_txs", e))
}
