pub mod config;
pub mod live;
