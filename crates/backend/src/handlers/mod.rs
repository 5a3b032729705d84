pub mod a001_commodity;
pub mod a003_account;
pub mod book;
pub mod queries;
