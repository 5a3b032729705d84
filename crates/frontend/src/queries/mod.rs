//! Клиенты read-only запросов к книге, по одному на маршрут бэкенда.

use contracts::dashboards::d400_monthly_totals::{
    EarliestDateResponse, LatestTransactions, MainCurrencyResponse, MonthlyTotals,
};
use contracts::domain::a001_commodity::aggregate::Commodity;
use contracts::domain::a002_price::aggregate::{Price, PriceFilter};
use contracts::domain::a003_account::aggregate::{Account, AccountId};
use contracts::domain::a004_transaction::aggregate::AccountSplit;
use chrono::NaiveDate;

use crate::shared::api_utils::get_json;

/// `/api/prices` with the filter as query string; no filter, no `?`.
pub fn prices_path(filter: &PriceFilter) -> Result<String, String> {
    let query = serde_qs::to_string(filter).map_err(|e| format!("Bad price filter: {}", e))?;
    Ok(if query.is_empty() {
        "/api/prices".to_string()
    } else {
        format!("/api/prices?{}", query)
    })
}

pub async fn get_prices(filter: &PriceFilter) -> Result<Vec<Price>, String> {
    get_json(&prices_path(filter)?).await
}

pub async fn get_splits(account: AccountId) -> Result<Vec<AccountSplit>, String> {
    get_json(&format!("/api/splits/{}", account)).await
}

pub async fn get_monthly_totals() -> Result<MonthlyTotals, String> {
    get_json("/api/monthly-totals").await
}

pub async fn get_main_currency() -> Result<Option<Commodity>, String> {
    get_json::<MainCurrencyResponse>("/api/main-currency")
        .await
        .map(|r| r.commodity)
}

pub async fn get_earliest_date() -> Result<NaiveDate, String> {
    get_json::<EarliestDateResponse>("/api/earliest-date")
        .await
        .map(|r| r.date)
}

pub async fn get_latest_txs() -> Result<LatestTransactions, String> {
    get_json("/api/txs/latest").await
}

pub async fn get_accounts() -> Result<Vec<Account>, String> {
    get_json("/api/accounts").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_commodity::aggregate::CommodityId;
    use uuid::Uuid;

    #[test]
    fn test_prices_path() {
        assert_eq!(prices_path(&PriceFilter::default()).unwrap(), "/api/prices");

        let from = CommodityId(Uuid::nil());
        let filter = PriceFilter {
            from: Some(from),
            to: None,
        };
        assert_eq!(
            prices_path(&filter).unwrap(),
            "/api/prices?from=00000000-0000-0000-0000-000000000000"
        );
    }
}
