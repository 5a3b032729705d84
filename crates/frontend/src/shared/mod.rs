pub mod api_utils;
pub mod cache;
pub mod date_utils;
pub mod icons;
pub mod theme;
