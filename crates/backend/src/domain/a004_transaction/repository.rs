use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d400_monthly_totals::MonthlySplitRow;
use contracts::domain::a001_commodity::aggregate::CommodityId;
use contracts::domain::a003_account::aggregate::{AccountId, AccountType};
use contracts::domain::a004_transaction::aggregate::{
    AccountSplit, Split, SplitId, Transaction, TransactionId, TransactionSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseBackend, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::{split_entity, transaction_entity};
use crate::shared::data::db::get_connection;

impl TryFrom<split_entity::Model> for Split {
    type Error = anyhow::Error;

    fn try_from(m: split_entity::Model) -> Result<Self, Self::Error> {
        Ok(Split {
            guid: SplitId(Uuid::parse_str(&m.guid)?),
            transaction: TransactionId(Uuid::parse_str(&m.tx_guid)?),
            account: AccountId(Uuid::parse_str(&m.account_guid)?),
            value: m.value,
            quantity: m.quantity,
        })
    }
}

fn to_transaction(m: transaction_entity::Model, splits: Vec<Split>) -> Result<Transaction> {
    Ok(Transaction {
        guid: TransactionId(Uuid::parse_str(&m.guid)?),
        description: m.description,
        date: m.date,
        currency: CommodityId(Uuid::parse_str(&m.currency_guid)?),
        splits,
    })
}

/// Most recent transactions (by date) with their splits.
pub async fn list_latest(limit: u64) -> Result<Vec<Transaction>> {
    let conn = get_connection();

    let headers = transaction_entity::Entity::find()
        .order_by_desc(transaction_entity::Column::Date)
        .order_by_asc(transaction_entity::Column::Guid)
        .limit(limit)
        .all(conn)
        .await?;

    let guids: Vec<String> = headers.iter().map(|h| h.guid.clone()).collect();
    let mut splits_by_tx: HashMap<String, Vec<Split>> = HashMap::new();
    for model in split_entity::Entity::find()
        .filter(split_entity::Column::TxGuid.is_in(guids))
        .all(conn)
        .await?
    {
        let tx_guid = model.tx_guid.clone();
        splits_by_tx
            .entry(tx_guid)
            .or_default()
            .push(Split::try_from(model)?);
    }

    headers
        .into_iter()
        .map(|h| {
            let splits = splits_by_tx.remove(&h.guid).unwrap_or_default();
            to_transaction(h, splits)
        })
        .collect()
}

#[derive(Debug, FromQueryResult)]
struct AccountSplitRow {
    guid: String,
    tx_guid: String,
    account_guid: String,
    value: f64,
    quantity: f64,
    description: String,
    date: NaiveDate,
}

/// Splits of one account joined with their transaction, newest first.
pub async fn list_for_account(account: AccountId) -> Result<Vec<AccountSplit>> {
    let sql = r#"
        SELECT
            s.guid, s.tx_guid, s.account_guid, s.value, s.quantity,
            t.description, t.date
        FROM splits s
        JOIN transactions t ON t.guid = s.tx_guid
        WHERE s.account_guid = ?
        ORDER BY t.date DESC, t.guid
    "#;

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        [account.to_string().into()],
    );

    AccountSplitRow::find_by_statement(stmt)
        .all(get_connection())
        .await?
        .into_iter()
        .map(|r| -> Result<AccountSplit> {
            let transaction = TransactionId(Uuid::parse_str(&r.tx_guid)?);
            Ok(AccountSplit {
                split: Split {
                    guid: SplitId(Uuid::parse_str(&r.guid)?),
                    transaction,
                    account: AccountId(Uuid::parse_str(&r.account_guid)?),
                    value: r.value,
                    quantity: r.quantity,
                },
                transaction: TransactionSummary {
                    guid: transaction,
                    description: r.description,
                    date: r.date,
                },
            })
        })
        .collect()
}

/// Date of the oldest transaction in the book.
pub async fn earliest_date() -> Result<Option<NaiveDate>> {
    let first = transaction_entity::Entity::find()
        .order_by_asc(transaction_entity::Column::Date)
        .one(get_connection())
        .await?;
    Ok(first.map(|t| t.date))
}

#[derive(Debug, FromQueryResult)]
struct MonthlyRow {
    account_guid: String,
    date: NaiveDate,
    quantity: f64,
}

/// Split quantities of accounts of the given types, with their transaction date.
pub async fn split_rows_for_types(types: &[AccountType]) -> Result<Vec<MonthlySplitRow>> {
    if types.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; types.len()].join(", ");
    let sql = format!(
        r#"
        SELECT s.account_guid, t.date, s.quantity
        FROM splits s
        JOIN transactions t ON t.guid = s.tx_guid
        JOIN accounts a ON a.guid = s.account_guid
        WHERE a.account_type IN ({})
        "#,
        placeholders
    );

    let values: Vec<sea_orm::Value> = types.iter().map(|t| t.as_str().into()).collect();
    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values);

    let rows = MonthlyRow::find_by_statement(stmt)
        .all(get_connection())
        .await?
        .into_iter()
        .map(|r| MonthlySplitRow {
            account: r.account_guid,
            date: r.date,
            quantity: r.quantity,
        })
        .collect();
    Ok(rows)
}

/// Insert a transaction and its splits atomically.
pub async fn insert(transaction: &Transaction) -> Result<()> {
    let txn = get_connection().begin().await?;

    transaction_entity::ActiveModel {
        guid: Set(transaction.guid.to_string()),
        description: Set(transaction.description.clone()),
        date: Set(transaction.date),
        currency_guid: Set(transaction.currency.to_string()),
    }
    .insert(&txn)
    .await?;

    for split in &transaction.splits {
        split_entity::ActiveModel {
            guid: Set(split.guid.to_string()),
            tx_guid: Set(transaction.guid.to_string()),
            account_guid: Set(split.account.to_string()),
            value: Set(split.value),
            quantity: Set(split.quantity),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(())
}
