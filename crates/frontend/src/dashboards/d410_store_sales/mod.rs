pub mod aggregation;
pub mod api;
pub mod query_guard;
pub mod resource;
pub mod scope;
pub mod state;
pub mod ui;
pub mod view_model;
