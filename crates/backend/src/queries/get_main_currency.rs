use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityId};
use contracts::domain::a003_account::aggregate::{Account, AccountType};
use std::collections::HashMap;

use crate::domain::{a001_commodity, a003_account};

/// The currency most accounts are denominated in.
pub async fn get_main_currency() -> anyhow::Result<Option<Commodity>> {
    let accounts = a003_account::repository::list_all().await?;
    let commodities = a001_commodity::repository::list_all().await?;
    Ok(elect_main_currency(&accounts, &commodities))
}

/// Count currency usage over non-root accounts; ties go to the
/// alphabetically first mnemonic so the answer is stable.
fn elect_main_currency(accounts: &[Account], commodities: &[Commodity]) -> Option<Commodity> {
    let currencies: HashMap<CommodityId, &Commodity> = commodities
        .iter()
        .filter(|c| c.is_currency())
        .map(|c| (c.guid, c))
        .collect();

    let mut usage: HashMap<CommodityId, usize> = HashMap::new();
    for account in accounts {
        if account.account_type == AccountType::Root {
            continue;
        }
        if let Some(commodity) = account.commodity.filter(|c| currencies.contains_key(c)) {
            *usage.entry(commodity).or_insert(0) += 1;
        }
    }

    usage
        .into_iter()
        .filter_map(|(guid, count)| currencies.get(&guid).map(|c| (count, *c)))
        .max_by(|(count_a, a), (count_b, b)| {
            count_a
                .cmp(count_b)
                .then_with(|| b.mnemonic.cmp(&a.mnemonic))
        })
        .map(|(_, commodity)| commodity.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_commodity::aggregate::CommodityDto;
    use contracts::domain::a003_account::aggregate::AccountId;

    fn currency(code: &str) -> Commodity {
        Commodity::new_for_insert(&CommodityDto::currency().with_mnemonic(code))
    }

    fn account(account_type: AccountType, commodity: Option<&Commodity>) -> Account {
        Account {
            guid: AccountId::new_v4(),
            name: format!("{:?}", account_type),
            account_type,
            commodity: commodity.map(|c| c.guid),
            parent: None,
            hidden: false,
            placeholder: false,
        }
    }

    #[test]
    fn test_most_used_currency_wins() {
        let eur = currency("EUR");
        let usd = currency("USD");
        let accounts = vec![
            account(AccountType::Bank, Some(&eur)),
            account(AccountType::Expense, Some(&eur)),
            account(AccountType::Income, Some(&usd)),
        ];

        let main = elect_main_currency(&accounts, &[eur.clone(), usd]);
        assert_eq!(main, Some(eur));
    }

    #[test]
    fn test_root_and_non_currency_accounts_ignored() {
        let eur = currency("EUR");
        let usd = currency("USD");
        let stock = Commodity::new_for_insert(&CommodityDto {
            namespace: "STOCK".into(),
            mnemonic: Some("AAPL".into()),
        });
        let accounts = vec![
            account(AccountType::Root, Some(&usd)),
            account(AccountType::Root, Some(&usd)),
            account(AccountType::Stock, Some(&stock)),
            account(AccountType::Stock, Some(&stock)),
            account(AccountType::Bank, Some(&eur)),
        ];

        let main = elect_main_currency(&accounts, &[eur.clone(), usd, stock]);
        assert_eq!(main, Some(eur));
    }

    #[test]
    fn test_tie_breaks_on_mnemonic() {
        let sgd = currency("SGD");
        let eur = currency("EUR");
        let accounts = vec![
            account(AccountType::Bank, Some(&sgd)),
            account(AccountType::Bank, Some(&eur)),
        ];

        let main = elect_main_currency(&accounts, &[sgd, eur.clone()]);
        assert_eq!(main, Some(eur));
    }

    #[test]
    fn test_no_accounts_no_currency() {
        assert_eq!(elect_main_currency(&[], &[currency("EUR")]), None);
    }
}
