use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_commodity::aggregate::CommodityId;
use crate::guid_type;

guid_type!(
    /// Уникальный идентификатор котировки
    PriceId
);

/// Quote of one commodity expressed in another on a given date.
///
/// `value` is how many units of `to` one unit of `from` is worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub guid: PriceId,
    pub from: CommodityId,
    pub to: CommodityId,
    pub date: NaiveDate,
    pub value: f64,
    pub source: Option<String>,
}

impl Price {
    /// Convert an amount of `from` into `to`.
    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.value
    }
}

/// Query string of `GET /api/prices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<CommodityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<CommodityId>,
}
