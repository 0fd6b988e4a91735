//! Configuration management for the API client
//!
//! This module handles loading and managing the service endpoints, outbound
//! HTTP options and logging settings.

pub mod loader;
pub mod settings;

pub use loader::{ConfigLoader, default_config_path};
pub use settings::{LoggingSettings, NetworkSettings, ServiceSettings, Settings};
