use contracts::domain::a002_price::aggregate::{Price, PriceFilter};

use crate::domain::a002_price::repository;

/// Prices between two commodities (either side optional), oldest first.
pub async fn get_prices(filter: PriceFilter) -> anyhow::Result<Vec<Price>> {
    repository::list(&filter).await
}
