pub mod config_service;
pub mod dto;
pub mod http_gateway;
pub mod paths;

pub use crate::config_service::{ClientConfig, ConfigService};
pub use crate::http_gateway::HttpSessionGateway;
pub use crate::paths::MentorlyPaths;
