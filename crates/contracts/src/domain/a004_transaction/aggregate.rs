use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_commodity::aggregate::CommodityId;
use crate::domain::a003_account::aggregate::AccountId;
use crate::guid_type;

guid_type!(
    /// Уникальный идентификатор проводки
    TransactionId
);

guid_type!(
    /// Уникальный идентификатор строки проводки
    SplitId
);

/// Строка проводки: движение по одному счёту.
///
/// `value` is in the transaction currency, `quantity` in the account commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub guid: SplitId,
    pub transaction: TransactionId,
    pub account: AccountId,
    pub value: f64,
    pub quantity: f64,
}

/// Проводка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub guid: TransactionId,
    pub description: String,
    pub date: NaiveDate,
    pub currency: CommodityId,
    pub splits: Vec<Split>,
}

impl Transaction {
    /// Sum of split values; zero for a balanced transaction.
    pub fn imbalance(&self) -> f64 {
        self.splits.iter().map(|s| s.value).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.imbalance().abs() < 1e-9
    }
}

/// Header of a transaction without its splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub guid: TransactionId,
    pub description: String,
    pub date: NaiveDate,
}

/// Split of one account joined with the transaction it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSplit {
    pub split: Split,
    pub transaction: TransactionSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(tx: TransactionId, value: f64) -> Split {
        Split {
            guid: SplitId::new_v4(),
            transaction: tx,
            account: AccountId::new_v4(),
            value,
            quantity: value,
        }
    }

    #[test]
    fn test_balanced_transaction() {
        let guid = TransactionId::new_v4();
        let tx = Transaction {
            guid,
            description: "Groceries".into(),
            date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            currency: CommodityId::new_v4(),
            splits: vec![split(guid, -42.5), split(guid, 42.5)],
        };
        assert!(tx.is_balanced());

        let mut unbalanced = tx.clone();
        unbalanced.splits.push(split(guid, 1.0));
        assert!(!unbalanced.is_balanced());
        assert_eq!(unbalanced.imbalance(), 1.0);
    }
}
