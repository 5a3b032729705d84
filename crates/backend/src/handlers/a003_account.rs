use axum::{http::StatusCode, Json};
use contracts::domain::a003_account::aggregate::Account;

use crate::domain::a003_account::repository;

/// GET /api/accounts
pub async fn list_all() -> Result<Json<Vec<Account>>, StatusCode> {
    match repository::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list accounts: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
