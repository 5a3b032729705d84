pub mod dashboard;
pub mod footer;
pub mod left_sidebar;
pub mod readiness;
pub mod topbar;

pub use dashboard::DashboardLayout;
