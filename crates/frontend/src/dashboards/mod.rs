pub mod d400_monthly_totals;

pub use d400_monthly_totals::ui::AccountsOverview;
