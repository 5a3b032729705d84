//! Shared types between the ledger backend and the Leptos frontend.

pub mod dashboards;
pub mod domain;
pub mod system;
