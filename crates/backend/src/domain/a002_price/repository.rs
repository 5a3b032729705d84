use chrono::NaiveDate;
use contracts::domain::a001_commodity::aggregate::CommodityId;
use contracts::domain::a002_price::aggregate::{Price, PriceFilter, PriceId};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: String,
    pub from_guid: String,
    pub to_guid: String,
    pub date: NaiveDate,
    pub value: f64,
    pub source: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Price {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Price {
            guid: PriceId(Uuid::parse_str(&m.guid)?),
            from: CommodityId(Uuid::parse_str(&m.from_guid)?),
            to: CommodityId(Uuid::parse_str(&m.to_guid)?),
            date: m.date,
            value: m.value,
            source: m.source,
        })
    }
}

/// Prices matching the filter, oldest first.
pub async fn list(filter: &PriceFilter) -> anyhow::Result<Vec<Price>> {
    let mut query = Entity::find();
    if let Some(from) = filter.from {
        query = query.filter(Column::FromGuid.eq(from.to_string()));
    }
    if let Some(to) = filter.to {
        query = query.filter(Column::ToGuid.eq(to.to_string()));
    }

    query
        .order_by_asc(Column::Date)
        .all(get_connection())
        .await?
        .into_iter()
        .map(Price::try_from)
        .collect()
}

pub async fn insert(price: &Price) -> anyhow::Result<()> {
    let active = ActiveModel {
        guid: Set(price.guid.to_string()),
        from_guid: Set(price.from.to_string()),
        to_guid: Set(price.to.to_string()),
        date: Set(price.date),
        value: Set(price.value),
        source: Set(price.source.clone()),
    };
    active.insert(get_connection()).await?;
    Ok(())
}
