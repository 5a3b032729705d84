mod dashboard;
mod table;

pub use dashboard::AccountsOverview;
