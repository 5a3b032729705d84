use serde::{Deserialize, Serialize};

/// Response of `GET /api/book/status`: whether the book database is open
/// and ready to answer queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStatus {
    pub loaded: bool,
}
