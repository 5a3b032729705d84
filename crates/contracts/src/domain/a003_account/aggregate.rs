use serde::{Deserialize, Serialize};

use crate::domain::a001_commodity::aggregate::CommodityId;
use crate::guid_type;

guid_type!(
    /// Уникальный идентификатор счёта
    AccountId
);

/// Тип счёта (совпадает с типами счетов GnuCash)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Root,
    Asset,
    Bank,
    Cash,
    Equity,
    Liability,
    Credit,
    Income,
    Expense,
    Stock,
    Mutual,
    Receivable,
    Payable,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Root => "ROOT",
            AccountType::Asset => "ASSET",
            AccountType::Bank => "BANK",
            AccountType::Cash => "CASH",
            AccountType::Equity => "EQUITY",
            AccountType::Liability => "LIABILITY",
            AccountType::Credit => "CREDIT",
            AccountType::Income => "INCOME",
            AccountType::Expense => "EXPENSE",
            AccountType::Stock => "STOCK",
            AccountType::Mutual => "MUTUAL",
            AccountType::Receivable => "RECEIVABLE",
            AccountType::Payable => "PAYABLE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.as_str() == s)
    }

    pub fn all() -> [AccountType; 13] {
        [
            AccountType::Root,
            AccountType::Asset,
            AccountType::Bank,
            AccountType::Cash,
            AccountType::Equity,
            AccountType::Liability,
            AccountType::Credit,
            AccountType::Income,
            AccountType::Expense,
            AccountType::Stock,
            AccountType::Mutual,
            AccountType::Receivable,
            AccountType::Payable,
        ]
    }

    /// Income and expense accounts feed the monthly totals.
    pub fn is_income_or_expense(&self) -> bool {
        matches!(self, AccountType::Income | AccountType::Expense)
    }
}

/// Счёт книги
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub guid: AccountId,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub commodity: Option<CommodityId>,
    pub parent: Option<AccountId>,
    pub hidden: bool,
    pub placeholder: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_parse_roundtrip() {
        for t in AccountType::all() {
            assert_eq!(AccountType::parse(t.as_str()), Some(t));
        }
        assert_eq!(AccountType::parse("expense"), None);
    }

    #[test]
    fn test_serde_uses_screaming_case() {
        let json = serde_json::to_string(&AccountType::Receivable).unwrap();
        assert_eq!(json, "\"RECEIVABLE\"");
    }
}
