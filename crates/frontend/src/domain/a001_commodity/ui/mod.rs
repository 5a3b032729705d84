pub mod currency_form;
pub mod list;
