pub mod chart;
pub mod dashboard;
pub mod data_table;
pub mod date_range;
pub mod filter_selector;
pub mod header;
pub mod option_select;
pub mod status;
pub mod summary;

pub use dashboard::DashboardPage;
pub use header::Header;
