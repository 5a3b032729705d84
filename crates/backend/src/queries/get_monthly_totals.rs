use contracts::dashboards::d400_monthly_totals::{aggregate_monthly_totals, MonthlyTotals};
use contracts::domain::a003_account::aggregate::AccountType;

use crate::domain::a004_transaction::repository;

/// Per-account, per-month totals of income and expense accounts.
pub async fn get_monthly_totals() -> anyhow::Result<MonthlyTotals> {
    let rows = repository::split_rows_for_types(&[AccountType::Income, AccountType::Expense])
        .await?;
    tracing::debug!("Aggregating {} splits into monthly totals", rows.len());
    Ok(aggregate_monthly_totals(rows))
}
