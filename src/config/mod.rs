//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup checks on loaded values

mod defaults;
mod types;
mod validation;

pub use types::{
    AutoconnectConfig, ClientConfig, Config, ConfigError, FilesConfig, IdentityConfig,
};
pub use validation::{ValidationError, validate};
