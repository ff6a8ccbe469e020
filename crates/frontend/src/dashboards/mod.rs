pub mod d410_store_sales;

pub use d410_store_sales::ui::StoreSalesDashboard;
