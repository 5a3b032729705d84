//! Таблица помесячных итогов: строки по счетам, колонки по месяцам.

use contracts::dashboards::d400_monthly_totals::MonthlyTotals;
use contracts::domain::a003_account::aggregate::{Account, AccountId, AccountType};
use contracts::domain::common::AggregateId;

use crate::shared::date_utils::sort_month_keys;

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub account: Option<AccountId>,
    pub name: String,
    pub account_type: Option<AccountType>,
    /// One cell per month column, zero where the account had no splits.
    pub cells: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsTable {
    pub months: Vec<String>,
    pub rows: Vec<TotalsRow>,
}

/// Lay totals out by account name. Income is credited, so its sign is flipped
/// to read as a positive amount.
pub fn build_totals_table(totals: &MonthlyTotals, accounts: &[Account]) -> TotalsTable {
    let months = sort_month_keys(totals.values().flat_map(|per_month| per_month.keys()));

    let mut rows: Vec<TotalsRow> = totals
        .iter()
        .map(|(guid, per_month)| {
            let account = accounts.iter().find(|a| a.guid.as_string() == *guid);
            let sign = match account.map(|a| a.account_type) {
                Some(AccountType::Income) => -1.0,
                _ => 1.0,
            };
            let cells: Vec<f64> = months
                .iter()
                .map(|m| sign * per_month.get(m).copied().unwrap_or(0.0))
                .collect();
            TotalsRow {
                account: account.map(|a| a.guid),
                name: account.map_or_else(|| guid.clone(), |a| a.name.clone()),
                account_type: account.map(|a| a.account_type),
                total: cells.iter().sum(),
                cells,
            }
        })
        .collect();

    // Income first, then expenses, each by name
    rows.sort_by(|a, b| {
        let rank = |r: &TotalsRow| match r.account_type {
            Some(AccountType::Income) => 0,
            Some(AccountType::Expense) => 1,
            _ => 2,
        };
        rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
    });

    TotalsTable { months, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn account(name: &str, account_type: AccountType) -> Account {
        Account {
            guid: AccountId::new_v4(),
            name: name.to_string(),
            account_type,
            commodity: None,
            parent: None,
            hidden: false,
            placeholder: false,
        }
    }

    fn months(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_build_totals_table() {
        let salary = account("Salary", AccountType::Income);
        let groceries = account("Groceries", AccountType::Expense);
        let rent = account("Rent", AccountType::Expense);

        let mut totals = MonthlyTotals::new();
        totals.insert(groceries.guid.to_string(), months(&[("01/2024", 180.0), ("12/2023", 200.0)]));
        totals.insert(salary.guid.to_string(), months(&[("01/2024", -2500.0)]));
        totals.insert(rent.guid.to_string(), months(&[("12/2023", 900.0)]));

        let table = build_totals_table(&totals, &[rent.clone(), salary.clone(), groceries.clone()]);

        assert_eq!(table.months, vec!["12/2023", "01/2024"]);
        let names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Groceries", "Rent"]);

        assert_eq!(table.rows[0].cells, vec![0.0, 2500.0]);
        assert_eq!(table.rows[0].total, 2500.0);
        assert_eq!(table.rows[1].cells, vec![200.0, 180.0]);
        assert_eq!(table.rows[2].account, Some(rent.guid));
    }

    #[test]
    fn test_unknown_account_keeps_guid() {
        let mut totals = MonthlyTotals::new();
        totals.insert("not-a-known-guid".to_string(), months(&[("03/2024", 5.0)]));

        let table = build_totals_table(&totals, &[]);
        assert_eq!(table.rows[0].name, "not-a-known-guid");
        assert_eq!(table.rows[0].account, None);
        assert_eq!(table.rows[0].cells, vec![5.0]);
    }

    #[test]
    fn test_empty_totals() {
        assert_eq!(build_totals_table(&MonthlyTotals::new(), &[]), TotalsTable::default());
    }
}
