use axum::{http::StatusCode, Json};
use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityDto};

use crate::domain::a001_commodity::service::{self, CommodityError};

/// GET /api/commodities
pub async fn list_all() -> Result<Json<Vec<Commodity>>, StatusCode> {
    match service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list commodities: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/commodities
///
/// 201 with the stored commodity; 400 / 409 carry a plain-text message for the form.
pub async fn create(
    Json(dto): Json<CommodityDto>,
) -> Result<(StatusCode, Json<Commodity>), (StatusCode, String)> {
    match service::create(dto).await {
        Ok(commodity) => Ok((StatusCode::CREATED, Json(commodity))),
        Err(CommodityError::Validation(errors)) => {
            let message = errors
                .first()
                .map(|(_, message)| message.to_string())
                .unwrap_or_else(|| "Invalid commodity".to_string());
            Err((StatusCode::BAD_REQUEST, message))
        }
        Err(e @ CommodityError::Duplicate { .. }) => Err((StatusCode::CONFLICT, e.to_string())),
        Err(CommodityError::Storage(e)) => {
            tracing::error!("Failed to create commodity: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save commodity".to_string(),
            ))
        }
    }
}
