// src/core/mod.rs
//! Configuration and the HTTP clients for the gateway's services

pub mod config_manager;
pub mod error;
pub mod ems_api;
pub mod experience_api;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use ems_api::EmsApi;
pub use error::{is_session_error, ClientError};
pub use experience_api::ExperienceApi;
pub use service_client::ServiceClient;
