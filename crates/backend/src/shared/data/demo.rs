use chrono::{Datelike, Months, NaiveDate, Utc};
use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityDto};
use contracts::domain::a002_price::aggregate::{Price, PriceId};
use contracts::domain::a003_account::aggregate::{Account, AccountId, AccountType};
use contracts::domain::a004_transaction::aggregate::{Split, SplitId, Transaction, TransactionId};

use crate::domain::{a001_commodity, a002_price, a003_account, a004_transaction};

/// Вставка демо-данных в пустую книгу.
///
/// Does nothing when the book already has accounts.
pub async fn seed_if_empty() -> anyhow::Result<()> {
    if a003_account::repository::count().await? > 0 {
        return Ok(());
    }
    tracing::info!("Empty book, inserting demo data");

    let eur = a001_commodity::service::create(CommodityDto::currency().with_mnemonic("EUR")).await?;
    let usd = a001_commodity::service::create(CommodityDto::currency().with_mnemonic("USD")).await?;

    let root = account("Root", AccountType::Root, None, None);
    let assets = account("Assets", AccountType::Asset, Some(&eur), Some(&root));
    let bank = account("Bank", AccountType::Bank, Some(&eur), Some(&assets));
    let broker = account("Broker", AccountType::Bank, Some(&usd), Some(&assets));
    let income = account("Income", AccountType::Income, Some(&eur), Some(&root));
    let salary = account("Salary", AccountType::Income, Some(&eur), Some(&income));
    let expenses = account("Expenses", AccountType::Expense, Some(&eur), Some(&root));
    let groceries = account("Groceries", AccountType::Expense, Some(&eur), Some(&expenses));
    for a in [&root, &assets, &bank, &broker, &income, &salary, &expenses, &groceries] {
        a003_account::repository::insert(a).await?;
    }

    let today = Utc::now().date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);

    for months_back in (0..3u32).rev() {
        let month = first_of_month
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(first_of_month);

        a004_transaction::repository::insert(&transfer(
            "Salary",
            month,
            &eur,
            &salary,
            &bank,
            2500.0,
        ))
        .await?;
        a004_transaction::repository::insert(&transfer(
            "Supermarket",
            month.with_day(10).unwrap_or(month),
            &eur,
            &bank,
            &groceries,
            180.0 + 15.0 * months_back as f64,
        ))
        .await?;

        a002_price::repository::insert(&Price {
            guid: PriceId::new_v4(),
            from: usd.guid,
            to: eur.guid,
            date: month,
            value: 0.92 - 0.01 * months_back as f64,
            source: Some("demo".to_string()),
        })
        .await?;
    }

    tracing::info!("Demo data inserted");
    Ok(())
}

fn account(
    name: &str,
    account_type: AccountType,
    commodity: Option<&Commodity>,
    parent: Option<&Account>,
) -> Account {
    Account {
        guid: AccountId::new_v4(),
        name: name.to_string(),
        account_type,
        commodity: commodity.map(|c| c.guid),
        parent: parent.map(|p| p.guid),
        hidden: false,
        placeholder: parent.is_none(),
    }
}

/// Two-split transaction moving `amount` from one account to another.
fn transfer(
    description: &str,
    date: NaiveDate,
    currency: &Commodity,
    from: &Account,
    to: &Account,
    amount: f64,
) -> Transaction {
    let guid = TransactionId::new_v4();
    let split = |account: &Account, value: f64| Split {
        guid: SplitId::new_v4(),
        transaction: guid,
        account: account.guid,
        value,
        quantity: value,
    };
    Transaction {
        guid,
        description: description.to_string(),
        date,
        currency: currency.guid,
        splits: vec![split(from, -amount), split(to, amount)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_is_balanced() {
        let eur = Commodity::new_for_insert(&CommodityDto::currency().with_mnemonic("EUR"));
        let bank = account("Bank", AccountType::Bank, Some(&eur), None);
        let food = account("Food", AccountType::Expense, Some(&eur), None);
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let tx = transfer("Lunch", date, &eur, &bank, &food, 12.5);
        assert!(tx.is_balanced());
        assert_eq!(tx.splits.len(), 2);
        assert!(tx.splits.iter().all(|s| s.transaction == tx.guid));
        assert_eq!(tx.splits[1].account, food.guid);
    }

    #[test]
    fn test_only_root_is_placeholder() {
        let root = account("Root", AccountType::Root, None, None);
        let child = account("Assets", AccountType::Asset, None, Some(&root));
        assert!(root.placeholder);
        assert!(!child.placeholder);
        assert_eq!(child.parent, Some(root.guid));
    }
}
