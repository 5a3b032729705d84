//! Currency Form UI Module
//!
//! MVVM pattern:
//! - fields.rs: field descriptors (what each input is and how it normalizes)
//! - model.rs: API functions
//! - view_model.rs: state, validation and submit command
//! - view.rs: Leptos component

pub mod fields;
mod model;
mod view;
mod view_model;

pub use view::CurrencyForm;
