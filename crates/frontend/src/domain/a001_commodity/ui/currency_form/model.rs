use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityDto};

use crate::shared::api_utils::post_json;

/// Persist a new commodity. 400 and 409 bodies are the messages to show.
pub async fn create_commodity(dto: &CommodityDto) -> Result<Commodity, String> {
    post_json("/api/commodities", dto).await
}
