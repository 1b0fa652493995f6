use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::LogFormat;

pub const ENV_CONFIG_PATH: &str = "CANOPY_CONFIG";
pub const ENV_LOG_FILTER: &str = "CANOPY_LOG";
pub const ENV_LOG_FORMAT: &str = "CANOPY_LOG_FORMAT";
pub const ENV_INITIAL_LOGIN_LOCATION: &str = "CANOPY_INITIAL_LOGIN_LOCATION";

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub logging: FileLoggingConfig,
    #[serde(default)]
    pub provisioning: FileProvisioningConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileProvisioningConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_login_location: Option<i32>,
}

/// Raw values read from the process environment.
///
/// Values are kept as strings here; the loader parses them so a malformed
/// override is reported instead of silently ignored.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub log_filter: Option<String>,
    pub log_format: Option<String>,
    pub initial_login_location: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var(ENV_CONFIG_PATH).map(PathBuf::from),
            log_filter: non_empty_var(ENV_LOG_FILTER),
            log_format: non_empty_var(ENV_LOG_FORMAT),
            initial_login_location: non_empty_var(ENV_INITIAL_LOGIN_LOCATION),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
