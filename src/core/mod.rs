pub mod flow;
pub mod models;
pub mod ports;
pub mod routing;
pub mod scoring;
pub mod services;
pub mod tokener;
