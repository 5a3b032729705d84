use contracts::domain::a004_transaction::aggregate::Transaction;

use crate::domain::a004_transaction::repository;

/// How many transactions the dashboard shows as "latest".
pub const LATEST_TXS_LIMIT: u64 = 5;

pub async fn get_latest_txs() -> anyhow::Result<Vec<Transaction>> {
    repository::list_latest(LATEST_TXS_LIMIT).await
}
