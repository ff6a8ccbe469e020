pub mod d410_store_sales;
