use axum::Json;
use contracts::system::book::BookStatus;

use crate::shared::data::db;

/// GET /api/book/status (public: polled before login)
pub async fn status() -> Json<BookStatus> {
    Json(BookStatus {
        loaded: db::is_initialized(),
    })
}
