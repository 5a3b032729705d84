pub mod repository;
mod split_entity;
mod transaction_entity;
