use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a001_commodity::aggregate::Commodity;
use crate::domain::a004_transaction::aggregate::Transaction;

/// Totals per account guid, then per month key ("MM/YYYY").
pub type MonthlyTotals = BTreeMap<String, BTreeMap<String, f64>>;

/// Month key used by [`MonthlyTotals`]: "MM/YYYY".
pub fn month_key(date: NaiveDate) -> String {
    format!("{:02}/{:04}", date.month(), date.year())
}

/// One split row feeding the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySplitRow {
    pub account: String,
    pub date: NaiveDate,
    pub quantity: f64,
}

/// Fold split rows into per-account, per-month sums.
pub fn aggregate_monthly_totals<I>(rows: I) -> MonthlyTotals
where
    I: IntoIterator<Item = MonthlySplitRow>,
{
    let mut totals = MonthlyTotals::new();
    for row in rows {
        *totals
            .entry(row.account)
            .or_default()
            .entry(month_key(row.date))
            .or_insert(0.0) += row.quantity;
    }
    totals
}

/// Response of `GET /api/main-currency`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainCurrencyResponse {
    pub commodity: Option<Commodity>,
}

/// Response of `GET /api/earliest-date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarliestDateResponse {
    pub date: NaiveDate,
}

/// Response of `GET /api/txs/latest`
pub type LatestTransactions = Vec<Transaction>;

#[cfg(test)]
mod tests {
    use super::*;

    fn row(account: &str, y: i32, m: u32, d: u32, quantity: f64) -> MonthlySplitRow {
        MonthlySplitRow {
            account: account.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_month_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 9).unwrap();
        assert_eq!(month_key(date), "03/2023");
    }

    #[test]
    fn test_aggregate_sums_per_account_and_month() {
        let totals = aggregate_monthly_totals(vec![
            row("salary", 2023, 1, 1, -1000.0),
            row("salary", 2023, 1, 31, -500.0),
            row("salary", 2023, 2, 1, -1000.0),
            row("food", 2023, 1, 10, 30.0),
            row("food", 2022, 1, 10, 20.0),
        ]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["salary"]["01/2023"], -1500.0);
        assert_eq!(totals["salary"]["02/2023"], -1000.0);
        assert_eq!(totals["food"]["01/2023"], 30.0);
        assert_eq!(totals["food"]["01/2022"], 20.0);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_monthly_totals(Vec::new()).is_empty());
    }
}
