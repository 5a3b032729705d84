use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityId};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "commodities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: String,
    pub namespace: String,
    pub mnemonic: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Commodity {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Commodity {
            guid: CommodityId(Uuid::parse_str(&m.guid)?),
            namespace: m.namespace,
            mnemonic: m.mnemonic,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn into_aggregates(models: Vec<Model>) -> anyhow::Result<Vec<Commodity>> {
    models.into_iter().map(Commodity::try_from).collect()
}

/// All commodities ordered by namespace, then mnemonic.
pub async fn list_all() -> anyhow::Result<Vec<Commodity>> {
    let models = Entity::find()
        .order_by_asc(Column::Namespace)
        .order_by_asc(Column::Mnemonic)
        .all(conn())
        .await?;
    into_aggregates(models)
}

pub async fn find_by_mnemonic(namespace: &str, mnemonic: &str) -> anyhow::Result<Option<Commodity>> {
    Entity::find()
        .filter(Column::Namespace.eq(namespace))
        .filter(Column::Mnemonic.eq(mnemonic))
        .one(conn())
        .await?
        .map(Commodity::try_from)
        .transpose()
}

pub async fn insert(aggregate: &Commodity) -> anyhow::Result<CommodityId> {
    let active = ActiveModel {
        guid: Set(aggregate.guid.to_string()),
        namespace: Set(aggregate.namespace.clone()),
        mnemonic: Set(aggregate.mnemonic.clone()),
    };
    active.insert(conn()).await?;
    Ok(aggregate.guid)
}
