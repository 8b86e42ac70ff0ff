//! Shared configuration, view-model types, and pure normalizers for the
//! `GlobalView` dashboard.
//!
//! Nothing in this crate performs network I/O. The client crate fetches raw
//! payloads and runs them through [`normalize`] and [`format`] to build the
//! records in [`views`].

pub mod app_config;
pub mod config;
pub mod format;
pub mod normalize;
pub mod views;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
