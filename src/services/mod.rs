pub mod aggregator;
pub mod availability;
pub mod constants;
pub mod data_loader;
pub mod distance;
