use contracts::domain::a001_commodity::aggregate::CommodityId;
use contracts::domain::a003_account::aggregate::{Account, AccountId, AccountType};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: String,
    pub name: String,
    pub account_type: String,
    pub commodity_guid: Option<String>,
    pub parent_guid: Option<String>,
    pub hidden: bool,
    pub placeholder: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_optional(guid: Option<&str>) -> anyhow::Result<Option<Uuid>> {
    guid.map(Uuid::parse_str).transpose().map_err(Into::into)
}

impl TryFrom<Model> for Account {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let account_type = AccountType::parse(&m.account_type)
            .ok_or_else(|| anyhow::anyhow!("Unknown account type: {}", m.account_type))?;
        Ok(Account {
            guid: AccountId(Uuid::parse_str(&m.guid)?),
            name: m.name,
            account_type,
            commodity: parse_optional(m.commodity_guid.as_deref())?.map(CommodityId),
            parent: parse_optional(m.parent_guid.as_deref())?.map(AccountId),
            hidden: m.hidden,
            placeholder: m.placeholder,
        })
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Account>> {
    Entity::find()
        .order_by_asc(Column::Name)
        .all(get_connection())
        .await?
        .into_iter()
        .map(Account::try_from)
        .collect()
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(get_connection()).await?)
}

pub async fn insert(account: &Account) -> anyhow::Result<()> {
    let active = ActiveModel {
        guid: Set(account.guid.to_string()),
        name: Set(account.name.clone()),
        account_type: Set(account.account_type.as_str().to_string()),
        commodity_guid: Set(account.commodity.map(|c| c.to_string())),
        parent_guid: Set(account.parent.map(|p| p.to_string())),
        hidden: Set(account.hidden),
        placeholder: Set(account.placeholder),
    };
    active.insert(get_connection()).await?;
    Ok(())
}
