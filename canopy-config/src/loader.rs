use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::models::{
    Config, ConfigMetadata, DEFAULT_INITIAL_LOGIN_LOCATION, DEFAULT_LOG_FILTER,
    LogFormat, LoggingConfig, ProvisioningConfig,
};
use crate::sources::{
    ENV_INITIAL_LOGIN_LOCATION, ENV_LOG_FORMAT, EnvConfig, FileConfig,
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("canopy.toml"),
        PathBuf::from("config/canopy.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// Result of a successful load, with non-fatal notes for the operator.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then the TOML file, then apply environment overrides.
    ///
    /// Warnings are logged as well as returned.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        if env_file_loaded {
            tracing::debug!("loaded .env file");
        }
        for warning in &load.warnings {
            tracing::warn!(warning = %warning, "configuration warning");
        }
        Ok(load)
    }

    /// Compose configuration from an already-gathered environment snapshot.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        self.compose_config(file_config, env, config_path)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = if let Some(path) = &self.options.config_path {
            (Some(path.clone()), true)
        } else if let Some(path) = &env.config_path {
            (Some(path.clone()), true)
        } else {
            let found = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
                .cloned();
            (found, false)
        };

        let Some(path) = path else {
            return Ok((None, None));
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = Vec::new();
        if config_path.is_none() {
            warnings.push(
                "No canopy.toml detected; using defaults and environment variables"
                    .to_string(),
            );
        }

        let FileConfig {
            logging: file_logging,
            provisioning: file_provisioning,
        } = file_config.unwrap_or_default();

        let format = match env.log_format.as_deref() {
            Some(raw) => raw.parse::<LogFormat>().map_err(|_| {
                ConfigLoadError::InvalidEnv {
                    key: ENV_LOG_FORMAT,
                    value: raw.to_string(),
                }
            })?,
            None => file_logging.format.unwrap_or_default(),
        };

        let logging = LoggingConfig {
            filter: env
                .log_filter
                .or(file_logging.filter)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            format,
        };

        let initial_login_location = match env.initial_login_location.as_deref()
        {
            Some(raw) => raw.parse::<i32>().map_err(|_| {
                ConfigLoadError::InvalidEnv {
                    key: ENV_INITIAL_LOGIN_LOCATION,
                    value: raw.to_string(),
                }
            })?,
            None => file_provisioning
                .initial_login_location
                .unwrap_or(DEFAULT_INITIAL_LOGIN_LOCATION),
        };

        let config = Config {
            logging,
            provisioning: ProvisioningConfig {
                initial_login_location,
            },
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        };

        Ok(ConfigLoad { config, warnings })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
