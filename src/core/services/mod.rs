pub mod config_service;
pub mod data_source_service;
pub mod group_service;
pub mod membership_service;
pub mod resolver;
pub mod types;
pub mod user_service;
