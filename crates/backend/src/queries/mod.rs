//! Read-only queries over the book, one function per file.

mod get_earliest_date;
mod get_latest_txs;
mod get_main_currency;
mod get_monthly_totals;
mod get_prices;
mod get_splits;

pub use get_earliest_date::get_earliest_date;
pub use get_latest_txs::{get_latest_txs, LATEST_TXS_LIMIT};
pub use get_main_currency::get_main_currency;
pub use get_monthly_totals::get_monthly_totals;
pub use get_prices::get_prices;
pub use get_splits::get_splits;

pub use contracts::dashboards::d400_monthly_totals::MonthlyTotals;
