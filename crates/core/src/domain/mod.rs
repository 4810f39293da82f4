pub mod stock;
pub mod view_model;
