use contracts::domain::a001_commodity::aggregate::Commodity;

use crate::shared::api_utils::get_json;

pub async fn fetch_commodities() -> Result<Vec<Commodity>, String> {
    get_json("/api/commodities").await
}
