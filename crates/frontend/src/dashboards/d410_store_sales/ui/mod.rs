pub mod dashboard;
pub mod filters_panel;
pub mod sales_table;
pub mod summary_cards;

pub use dashboard::StoreSalesDashboard;
