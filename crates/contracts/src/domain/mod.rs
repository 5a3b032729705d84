pub mod a001_commodity;
pub mod a002_price;
pub mod a003_account;
pub mod a004_transaction;
pub mod common;
