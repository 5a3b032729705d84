use contracts::domain::a003_account::aggregate::AccountId;
use contracts::domain::a004_transaction::aggregate::AccountSplit;

use crate::domain::a004_transaction::repository;

/// Splits of an account with their transaction, most recent transaction first.
pub async fn get_splits(account: AccountId) -> anyhow::Result<Vec<AccountSplit>> {
    repository::list_for_account(account).await
}
