//! Shared configuration library for Canopy.
//!
//! Loads layered settings (`.env`, an optional `canopy.toml`, then process
//! environment overrides) and installs the tracing subscriber used by every
//! Canopy process.

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod telemetry;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    Config, ConfigMetadata, DEFAULT_INITIAL_LOGIN_LOCATION, DEFAULT_LOG_FILTER,
    LogFormat, LoggingConfig, ProvisioningConfig,
};
pub use telemetry::{TelemetryError, init_tracing};
