pub mod auth;
pub mod data_source;
pub mod pages;
